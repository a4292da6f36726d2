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
use rand::rngs::StdRng;
use rand::SeedableRng;
use tilenano_design::config::ColorSetting;
use tilenano_design::{
    complement, extract, HelixBase, SideBinding, StapleRow, StapleTable, Tile, BASES, PLACEHOLDER,
};

const DATA_BIT: &str = "#00ff10";
const SIDE: &str = "#aa00ff";
const EDGE: &str = "#03b6a2";
const MODIFIED: &str = "#000000";

const UPPER: TilePosition = TilePosition { x: 0, y: 0 };
const MIDDLE: TilePosition = TilePosition { x: 0, y: -1 };
const LOWER: TilePosition = TilePosition { x: 0, y: -2 };

fn colors() -> ColorSetting {
    ColorSetting {
        data_bit: DATA_BIT.to_owned(),
        side_overhang: SIDE.to_owned(),
        other_overhang: EDGE.to_owned(),
        modified_staples: Some(MODIFIED.to_owned()),
    }
}

fn row(start: (isize, isize), end: (isize, isize), sequence: &str, color: &str) -> StapleRow {
    StapleRow {
        start: HelixBase::new(start.0, start.1),
        end: HelixBase::new(end.0, end.1),
        sequence: sequence.to_owned(),
        length: sequence.len(),
        color: color.to_owned(),
    }
}

struct TileInput {
    position: TilePosition,
    shift: Option<isize>,
    rows: Vec<StapleRow>,
}

fn tile(position: TilePosition, shift: Option<isize>, rows: Vec<StapleRow>) -> TileInput {
    TileInput {
        position,
        shift,
        rows,
    }
}

fn design_with_binding(tiles: Vec<TileInput>, side_binding: SideBinding) -> TiledDesign {
    let mut design = TiledDesign::new((1, tiles.len()), colors(), side_binding);
    for (i, input) in tiles.into_iter().enumerate() {
        let mut rows = vec![row((8, 8), (8, 40), "ACGTACGTACGTACGTACGTACGTACGTACGTA", DATA_BIT)];
        rows.extend(input.rows);
        design
            .add_tile(Tile::new(
                format!("tile_{}", i),
                input.position,
                input.shift,
                StapleTable::from_rows(rows),
            ))
            .unwrap();
    }
    design
}

fn design(tiles: Vec<TileInput>) -> TiledDesign {
    design_with_binding(tiles, SideBinding::SameSide)
}

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn assign(design: &TiledDesign, strategy: Strategy) -> Result<AssignmentOutcome, AssignError> {
    let staples = extract(design);
    AssignmentRun::new(design, &staples, seeded(42)).run(strategy)
}

fn stored<'a>(outcome: &'a AssignmentOutcome, position: TilePosition, edge: Edge) -> Vec<&'a str> {
    outcome.store[&position][&edge]
        .values()
        .map(String::as_str)
        .collect()
}

fn bottom_row(base: isize, sequence: &str) -> StapleRow {
    row((17, base), (16, base + 15), sequence, EDGE)
}

fn top_row(base: isize, sequence: &str) -> StapleRow {
    row((0, base), (1, base + 15), sequence, EDGE)
}

/// A column of two tiles bound by one pair of overhangs.
fn column() -> TiledDesign {
    design(vec![
        tile(UPPER, Some(0), vec![bottom_row(40, "????GGAA")]),
        tile(MIDDLE, Some(0), vec![top_row(40, "AAGG????")]),
    ])
}

#[test]
fn column_overhangs_are_complementary() {
    let outcome = assign(&column(), Strategy::Sweep).unwrap();
    let upper = stored(&outcome, UPPER, Edge::Bottom);
    let lower = stored(&outcome, MIDDLE, Edge::Top);
    assert_eq!(upper[0].len(), 4);
    assert_eq!(lower[0], complement(upper[0]));
    assert_eq!(outcome.nb_random_fills, 1);

    // helix 17 is odd, the random bases are written as recorded
    let upper_seq = &outcome.tables[&UPPER].rows()[1].sequence;
    assert_eq!(*upper_seq, format!("{}GGAA", upper[0]));
    // helix 0 is even, the paired bases are written backward
    let lower_seq = &outcome.tables[&MIDDLE].rows()[1].sequence;
    assert_eq!(*lower_seq, format!("AAGG{}", reversed(lower[0])));

    assert_eq!(outcome.finished[&UPPER][&Edge::Bottom], vec![upper_seq.clone()]);
    assert_eq!(outcome.finished[&MIDDLE][&Edge::Top], vec![lower_seq.clone()]);
}

#[test]
fn free_edges_are_left_unassigned() {
    let design = design(vec![tile(UPPER, Some(0), vec![bottom_row(40, "????GGAA")])]);
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    assert_eq!(outcome.tables[&UPPER].rows()[1].sequence, "????GGAA");
    assert!(outcome.store.get(&UPPER).is_none());
    assert!(outcome.finished[&UPPER].get(&Edge::Bottom).is_none());
    assert_eq!(outcome.nb_random_fills, 0);
}

#[test]
fn isolated_tile_gets_random_bases_on_free_edges() {
    let design = design(vec![tile(UPPER, Some(0), vec![bottom_row(40, "AC????GT")])]);
    let staples = extract(&design);
    let outcome = AssignmentRun::new(&design, &staples, seeded(3))
        .fill_free_edges(true)
        .run(Strategy::Sweep)
        .unwrap();
    let sequence = &outcome.tables[&UPPER].rows()[1].sequence;
    assert!(sequence.starts_with("AC"));
    assert!(sequence.ends_with("GT"));
    assert!(sequence[2..6].chars().all(|c| BASES.contains(&c)));
    assert_eq!(outcome.finished[&UPPER][&Edge::Bottom], vec![sequence.clone()]);
    assert_eq!(outcome.nb_random_fills, 1);
}

#[test]
fn left_overhang_reads_left_table() {
    let sequence = format!("ACGT{}TTGA", "?".repeat(16));
    let design = design(vec![tile(
        UPPER,
        Some(0),
        vec![row((4, 8), (3, 40), &sequence, SIDE)],
    )]);
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    // LEFT[3] is TTTAAATTCAAACTAG
    assert_eq!(stored(&outcome, UPPER, Edge::Left), vec!["GATCAAACTTAAATTT"]);
    // helix 3 is odd, the reversed entry is written as is
    assert_eq!(
        outcome.tables[&UPPER].rows()[1].sequence,
        "ACGTGATCAAACTTAAATTTTTGA"
    );
}

#[test]
fn shift_is_inferred_from_top_edge() {
    let sequence = "?".repeat(16);
    let design = design(vec![tile(
        UPPER,
        None,
        vec![
            row((4, 8), (5, 40), &sequence, SIDE),
            top_row(40, "AAGG????"),
        ],
    )]);
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    // exit helix 5, shifted by 2
    assert_eq!(stored(&outcome, UPPER, Edge::Left), vec!["GATCAAACTTAAATTT"]);
}

#[test]
fn right_overhang_on_even_helix() {
    let sequence = format!("{}GGCA", "?".repeat(16));
    let design = design(vec![tile(
        UPPER,
        Some(2),
        vec![row((6, 280), (7, 264), &sequence, SIDE)],
    )]);
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    // RIGHT[4] is GTAGCATTAACATCCA, written in the direction of the table on even helices
    assert_eq!(
        outcome.tables[&UPPER].rows()[1].sequence,
        "GTAGCATTAACATCCAGGCA"
    );
    assert_eq!(stored(&outcome, UPPER, Edge::Right), vec!["ACCTACAATTACGATG"]);
}

#[test]
fn opposite_side_binding() {
    let sequence = "?".repeat(16);
    let design = design_with_binding(
        vec![tile(UPPER, Some(0), vec![row((4, 8), (3, 40), &sequence, SIDE)])],
        SideBinding::OppositeSide,
    );
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    // RIGHT[3] is TCGATCTTGCCAACTT
    assert_eq!(stored(&outcome, UPPER, Edge::Left), vec!["TTCAACCGTTCTAGCT"]);
}

#[test]
fn scaffold_helix_out_of_table() {
    let sequence = "?".repeat(16);
    let design = design(vec![tile(
        UPPER,
        Some(4),
        vec![row((4, 8), (3, 40), &sequence, SIDE)],
    )]);
    assert!(matches!(
        assign(&design, Strategy::Sweep),
        Err(AssignError::UnknownScaffoldHelix { helix: -1, .. })
    ));
}

/// Four top overhangs on the middle tile, three bottom overhangs on the upper tile.
fn unbalanced() -> TiledDesign {
    let side = "?".repeat(16);
    design(vec![
        tile(
            MIDDLE,
            Some(0),
            vec![
                top_row(8, "AAGG????"),
                top_row(40, "AAGG????"),
                top_row(72, "AAGG????"),
                top_row(104, "AAGG????"),
                row((4, 8), (3, 40), &side, SIDE),
            ],
        ),
        tile(
            UPPER,
            Some(0),
            vec![
                bottom_row(8, "CCTT????"),
                bottom_row(40, "CCTT????"),
                bottom_row(72, "CCTT????"),
            ],
        ),
    ])
}

#[test]
fn count_mismatch_is_detected_before_any_write() {
    let design = unbalanced();
    let staples = extract(&design);
    let mut run = AssignmentRun::new(&design, &staples, seeded(42));
    let err = run.assign(Strategy::Sweep).unwrap_err();
    assert_eq!(
        err,
        AssignError::OverhangCountMismatch {
            position: MIDDLE,
            edge: Edge::Top,
            count: 4,
            neighbour: UPPER,
            partner_count: 3,
        }
    );
    assert!(run.store.is_empty());
    for tile in design.tiles() {
        assert_eq!(run.tables[&tile.position], *tile.original_table());
    }
}

#[test]
fn placeholder_mismatch() {
    let design = design(vec![
        tile(UPPER, Some(0), vec![bottom_row(40, "????GGAA")]),
        tile(MIDDLE, Some(0), vec![top_row(40, "AAG?????")]),
    ]);
    assert!(matches!(
        assign(&design, Strategy::Sweep),
        Err(AssignError::PlaceholderMismatch {
            placeholders: 5,
            bases: 4,
            ..
        })
    ));
}

#[test]
fn non_contiguous_placeholders() {
    let design = design(vec![
        tile(UPPER, Some(0), vec![bottom_row(40, "??GG??")]),
        tile(MIDDLE, Some(0), vec![top_row(40, "????")]),
    ]);
    assert!(matches!(
        assign(&design, Strategy::Sweep),
        Err(AssignError::NonContiguousPlaceholders { .. })
    ));
}

#[test]
fn orientation_of_side_edges_is_unknown() {
    let staple = Staple::new(
        0,
        &row((4, 8), (3, 40), "????", SIDE),
        tilenano_design::StapleCategory::SideOverhang,
        Edge::Left,
    );
    assert_eq!(
        at_even(Edge::Left, &staple),
        Err(AssignError::UnknownEdge(Edge::Left))
    );
    let top = Staple::new(
        0,
        &top_row(8, "????"),
        tilenano_design::StapleCategory::EdgeOverhang,
        Edge::Top,
    );
    assert_eq!(at_even(Edge::Top, &top), Ok(true));
    assert_eq!(at_even(Edge::Bottom, &top), Ok(false));
}

#[test]
fn insertion_keeps_other_bases() {
    let staple = Staple::new(
        0,
        &top_row(8, "AC???T"),
        tilenano_design::StapleCategory::EdgeOverhang,
        Edge::Top,
    );
    assert_eq!(insert_bases(&staple, "GGA", false).unwrap(), "ACGGAT");
    assert_eq!(insert_bases(&staple, "GGA", true).unwrap(), "ACAGGT");
}

/// A column of three tiles, with a side overhang, a normal staple and a modified staple.
fn tall_column(order: [TilePosition; 3]) -> TiledDesign {
    let side = format!("TT{}", "?".repeat(16));
    let rows = |position: TilePosition| match position {
        UPPER => vec![
            bottom_row(8, "CCTT????"),
            bottom_row(40, "??????GA"),
            row((9, 60), (9, 75), "TTGGCCAATTGGCCAA", EDGE),
        ],
        MIDDLE => vec![
            top_row(8, "????AAGG"),
            top_row(40, "A??????A"),
            bottom_row(8, "CC?????"),
            row((4, 8), (3, 40), &side, SIDE),
            row((12, 100), (12, 116), "CACACACA", MODIFIED),
        ],
        _ => vec![top_row(8, "?????GG")],
    };
    design(
        order
            .iter()
            .map(|position| tile(*position, Some(0), rows(*position)))
            .collect(),
    )
}

fn assert_placeholders_replaced(design: &TiledDesign, outcome: &AssignmentOutcome) {
    for tile in design.tiles() {
        let before = tile.original_table().rows();
        let after = outcome.tables[&tile.position].rows();
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(old.sequence.len(), new.sequence.len());
            for (a, b) in old.sequence.chars().zip(new.sequence.chars()) {
                if a == PLACEHOLDER {
                    assert!(BASES.contains(&b), "{} in {}", b, new.sequence);
                } else {
                    assert_eq!(a, b);
                }
            }
            assert_eq!(old.start, new.start);
            assert_eq!(old.color, new.color);
        }
    }
}

#[test]
fn every_placeholder_is_replaced() {
    let design = tall_column([UPPER, MIDDLE, LOWER]);
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    assert_placeholders_replaced(&design, &outcome);
    assert_eq!(
        outcome.finished[&MIDDLE][&Edge::Modified],
        vec!["CACACACA".to_owned()]
    );
    assert_eq!(
        outcome.finished[&UPPER][&Edge::Normal],
        vec!["TTGGCCAATTGGCCAA".to_owned()]
    );
}

#[test]
fn pairs_are_complementary_in_any_order() {
    for strategy in [Strategy::Sweep, Strategy::FixedPoint].iter() {
        for order in [[UPPER, MIDDLE, LOWER], [LOWER, UPPER, MIDDLE]].iter() {
            let design = tall_column(*order);
            let outcome = assign(&design, *strategy).unwrap();
            assert_placeholders_replaced(&design, &outcome);
            for (position, edge, neighbour, partner) in [
                (UPPER, Edge::Bottom, MIDDLE, Edge::Top),
                (MIDDLE, Edge::Bottom, LOWER, Edge::Top),
            ]
            .iter()
            {
                let assigned = stored(&outcome, *position, *edge);
                let paired = stored(&outcome, *neighbour, *partner);
                assert_eq!(assigned.len(), paired.len());
                for (a, p) in assigned.iter().zip(paired.iter()) {
                    assert_eq!(*a, complement(p));
                }
            }
        }
    }
}

#[test]
fn fixed_point_fills_one_edge_per_pair() {
    for order in [[UPPER, MIDDLE, LOWER], [LOWER, UPPER, MIDDLE], [MIDDLE, LOWER, UPPER]].iter() {
        let outcome = assign(&tall_column(*order), Strategy::FixedPoint).unwrap();
        assert_eq!(outcome.nb_random_fills, 2);
    }
}

#[test]
fn same_seed_same_result() {
    let design = tall_column([UPPER, MIDDLE, LOWER]);
    let staples = extract(&design);
    let first = AssignmentRun::new(&design, &staples, seeded(7))
        .run(Strategy::Sweep)
        .unwrap();
    let second = AssignmentRun::new(&design, &staples, seeded(7))
        .run(Strategy::Sweep)
        .unwrap();
    assert_eq!(first.tables, second.tables);
    assert_eq!(first.store, second.store);
}

#[test]
fn tampered_pairing_fails_verification() {
    let design = column();
    let staples = extract(&design);
    let mut run = AssignmentRun::new(&design, &staples, seeded(42));
    run.assign(Strategy::Sweep).unwrap();
    assert!(run.verify().is_ok());
    let key = staples.group(&MIDDLE, Edge::Top).unwrap()[0].key();
    run.record_bases(MIDDLE, Edge::Top, key, "XXXX".to_owned());
    assert!(matches!(
        run.verify(),
        Err(AssignError::PairingMismatch { .. })
    ));
}

#[test]
fn tampered_side_fails_verification() {
    let sequence = "?".repeat(16);
    let design = design(vec![tile(
        UPPER,
        Some(0),
        vec![row((4, 8), (3, 40), &sequence, SIDE)],
    )]);
    let staples = extract(&design);
    let mut run = AssignmentRun::new(&design, &staples, seeded(42));
    run.assign(Strategy::Sweep).unwrap();
    let key = staples.group(&UPPER, Edge::Left).unwrap()[0].key();
    run.record_bases(UPPER, Edge::Left, key, "TTTAAATTCAAACTAG".to_owned());
    match run.verify() {
        Err(AssignError::ScaffoldMismatch {
            helix, scaffold, ..
        }) => {
            assert_eq!(helix, 3);
            assert_eq!(scaffold, complement("GATCAAACTTAAATTT"));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn commit_writes_tables() {
    let mut design = column();
    let outcome = assign(&design, Strategy::Sweep).unwrap();
    outcome.commit(&mut design);
    for tile in design.tiles() {
        assert_eq!(tile.table, outcome.tables[&tile.position]);
        assert!(tile.original_table().rows()[1].sequence.contains(PLACEHOLDER));
    }
}
