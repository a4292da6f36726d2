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
//! Extraction of the overhangs of each tile.
//!
//! The staples colored as overhangs or as modified staples are classified by the edge of the
//! tile they belong to, and sorted so that the i-th overhang of an edge faces the i-th overhang
//! of the facing edge of the neighbouring tile.

use super::config::ColorSetting;
use super::{Edge, Staple, StapleCategory, StapleRow, StapleTable, TilePosition, TiledDesign};
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Side overhangs whose start is beyond this base index are on the right side of the tile.
pub const RIGHT_SIDE_MIN_BASE: isize = 200;
/// Top or bottom overhangs whose start is beyond this helix index are on the bottom of the tile.
pub const BOTTOM_MIN_HELIX: isize = 15;

/// The staples of one tile, grouped by edge. Each group is sorted.
pub type TileStaples = BTreeMap<Edge, Vec<Staple>>;

/// The staples of all the tiles of a design, in the order of the tiles of the design.
#[derive(Debug, Clone, Default)]
pub struct ExtractedStaples {
    tiles: Vec<(TilePosition, TileStaples)>,
    index: AHashMap<TilePosition, usize>,
}

impl ExtractedStaples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the staples of a tile. If the tile was already present, its staples are replaced
    /// but it keeps its rank.
    pub fn insert(&mut self, position: TilePosition, staples: TileStaples) {
        if let Some(idx) = self.index.get(&position) {
            self.tiles[*idx].1 = staples;
        } else {
            self.index.insert(position, self.tiles.len());
            self.tiles.push((position, staples));
        }
    }

    pub fn get(&self, position: &TilePosition) -> Option<&TileStaples> {
        self.index.get(position).map(|idx| &self.tiles[*idx].1)
    }

    pub fn get_mut(&mut self, position: &TilePosition) -> Option<&mut TileStaples> {
        let idx = *self.index.get(position)?;
        Some(&mut self.tiles[idx].1)
    }

    pub fn group(&self, position: &TilePosition, edge: Edge) -> Option<&Vec<Staple>> {
        self.get(position).and_then(|staples| staples.get(&edge))
    }

    pub fn group_mut(&mut self, position: &TilePosition, edge: Edge) -> Option<&mut Vec<Staple>> {
        self.get_mut(position).and_then(|staples| staples.get_mut(&edge))
    }

    pub fn contains(&self, position: &TilePosition) -> bool {
        self.index.contains_key(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TilePosition, &TileStaples)> {
        self.tiles.iter().map(|(p, s)| (p, s))
    }

    pub fn positions(&self) -> impl Iterator<Item = &TilePosition> {
        self.tiles.iter().map(|(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Extract the staples of every tile of the design.
pub fn extract(design: &TiledDesign) -> ExtractedStaples {
    let mut ret = ExtractedStaples::new();
    for tile in design.tiles() {
        let staples = extract_tile(&tile.table, &design.colors);
        log::debug!(
            "Tile {} at {}: {} staple group(s)",
            tile.name,
            tile.position,
            staples.len()
        );
        ret.insert(tile.position, staples);
    }
    ret
}

/// Extract the staples of one tile.
pub fn extract_tile(table: &StapleTable, colors: &ColorSetting) -> TileStaples {
    let mut ret = TileStaples::new();
    let color_groups = [
        Some(colors.other_overhang.as_str()),
        Some(colors.side_overhang.as_str()),
        colors.modified_staples.as_deref(),
    ];
    for color in color_groups.iter().flatten() {
        let category = colors.category(color);
        let mut group: Vec<Staple> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.color == *color)
            .map(|(row_idx, row)| Staple::new(row_idx, row, category, locate(category, row)))
            .collect();
        sort_group(&mut group, category);
        for staple in group {
            ret.entry(staple.edge).or_insert_with(Vec::new).push(staple);
        }
    }
    ret
}

/// Sort a group of staples of the same category, from left to right for the top and bottom
/// overhangs and from top to bottom for the side overhangs.
fn sort_group(group: &mut [Staple], category: StapleCategory) {
    match category {
        StapleCategory::SideOverhang => group.sort_by_key(Staple::side_order_key),
        StapleCategory::EdgeOverhang => group.sort_by_key(Staple::edge_order_key),
        _ => (),
    }
}

/// The edge on which a staple lies. Overhangs whose sequence is already complete are normal
/// staples.
pub fn locate(category: StapleCategory, row: &StapleRow) -> Edge {
    let has_placeholder = row.sequence.contains(super::PLACEHOLDER);
    match category {
        StapleCategory::SideOverhang if has_placeholder => {
            if row.start.base > RIGHT_SIDE_MIN_BASE {
                Edge::Right
            } else {
                Edge::Left
            }
        }
        StapleCategory::EdgeOverhang if has_placeholder => {
            if row.start.helix > BOTTOM_MIN_HELIX {
                Edge::Bottom
            } else {
                Edge::Top
            }
        }
        StapleCategory::Modified => Edge::Modified,
        _ => Edge::Normal,
    }
}
