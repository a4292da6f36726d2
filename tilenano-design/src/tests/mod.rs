/*
TileNano, overhang assignment for tiled DNA origami assemblies.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::*;
use std::path::PathBuf;

fn column_config_path() -> PathBuf {
    let mut ret = PathBuf::from(std::env!("CARGO_MANIFEST_DIR"));
    ret.push("tests");
    ret.push("column");
    ret.push("config.json");
    ret
}

fn column_design() -> TiledDesign {
    TiledDesign::from_config_path(column_config_path()).expect("Could not load column design")
}

#[test]
fn load_column_design() {
    let design = column_design();
    assert_eq!(design.size, (1, 2));
    assert_eq!(design.nb_tiles(), 2);
    let names: Vec<&str> = design.tiles().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["upper", "lower"]);

    let upper = design.get(&TilePosition::new(0, 0)).unwrap();
    assert_eq!(upper.shift, Some(0));
    assert_eq!(upper.table.len(), 7);
    assert_eq!(upper.table, *upper.original_table());

    let lower = design.get(&TilePosition::new(0, -1)).unwrap();
    assert_eq!(lower.shift, None);
    assert_eq!(lower.table.rows()[2].start, HelixBase::new(6, 280));
}

#[test]
fn extract_column_design() {
    let design = column_design();
    let staples = extract(&design);
    assert_eq!(staples.len(), 2);
    assert_eq!(
        staples.positions().cloned().collect::<Vec<_>>(),
        vec![TilePosition::new(0, 0), TilePosition::new(0, -1)]
    );

    let upper = staples.get(&TilePosition::new(0, 0)).unwrap();
    assert_eq!(
        upper.keys().cloned().collect::<Vec<_>>(),
        vec![Edge::Bottom, Edge::Left, Edge::Normal, Edge::Modified]
    );
    let bottom = &upper[&Edge::Bottom];
    assert_eq!(bottom.len(), 2);
    // sorted from left to right, not in table order
    assert_eq!(bottom[0].base_indices(), (23, 8));
    assert_eq!(bottom[0].row, 3);
    assert_eq!(bottom[1].base_indices(), (40, 55));
    assert_eq!(bottom[1].row, 1);
    assert_eq!(upper[&Edge::Left][0].category, StapleCategory::SideOverhang);
    assert_eq!(upper[&Edge::Normal][0].sequence(), "TTGGCCAATTGGCCAA");

    let lower = staples.get(&TilePosition::new(0, -1)).unwrap();
    assert_eq!(
        lower.keys().cloned().collect::<Vec<_>>(),
        vec![Edge::Top, Edge::Right]
    );
    assert_eq!(lower[&Edge::Top][0].base_indices(), (8, 23));
    assert_eq!(lower[&Edge::Top][1].base_indices(), (55, 40));
}

#[test]
fn tile_without_overhangs_has_no_groups() {
    let design = column_design();
    let table = StapleTable::from_rows(vec![StapleRow {
        start: HelixBase::new(0, 8),
        end: HelixBase::new(0, 23),
        sequence: String::from("ACGTACGTACGTACGT"),
        length: 16,
        color: String::from("#00ff10"),
    }]);
    assert!(extract_tile(&table, &design.colors).is_empty());
}

#[test]
fn duplicate_positions_are_rejected() {
    let mut design = column_design();
    let tile = design.tiles().next().unwrap().clone();
    assert!(matches!(
        design.add_tile(tile),
        Err(LoadDesignError::DuplicatePosition(_))
    ));
}

#[test]
fn neighbours_along_y() {
    let position = TilePosition::new(2, -1);
    assert_eq!(position.neighbour(Edge::Top), Some(TilePosition::new(2, 0)));
    assert_eq!(
        position.neighbour(Edge::Bottom),
        Some(TilePosition::new(2, -2))
    );
    assert_eq!(position.neighbour(Edge::Left), None);
    assert_eq!(position.to_string(), "(2, -1)");
}
