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

use super::{PLACEHOLDER, StapleRow};
use std::ops::Range;
mod formating;

/// The side of a tile on which a staple is located, i.e. the direction in which it binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
    /// Staples that do not need any assignment.
    Normal,
    /// Inactive staples lying between scaffolds, kept as they are.
    Modified,
}

impl Edge {
    /// The edge of the neighbouring tile facing `self`.
    pub fn opposite(self) -> Option<Edge> {
        match self {
            Self::Top => Some(Self::Bottom),
            Self::Bottom => Some(Self::Top),
            Self::Left => Some(Self::Right),
            Self::Right => Some(Self::Left),
            Self::Normal | Self::Modified => None,
        }
    }

    /// True for the edges whose overhangs pair with the overhangs of another tile.
    pub fn pairs_with_tile(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// True for the edges whose overhangs bind to the scaffold.
    pub fn binds_scaffold(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The role of a staple, as given by its color in the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StapleCategory {
    DataBit,
    /// Overhang on the top or bottom side of a tile
    EdgeOverhang,
    /// Overhang on the left or right side of a tile
    SideOverhang,
    Modified,
    Plain,
}

/// A location in a tile, given by a helix index and a base index on that helix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HelixBase {
    pub helix: isize,
    pub base: isize,
}

impl HelixBase {
    pub fn new(helix: isize, base: isize) -> Self {
        Self { helix, base }
    }
}

/// Identifies a staple inside of a tile by the positions of its two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StapleKey {
    pub start: HelixBase,
    pub end: HelixBase,
}

/// A staple of a tile.
///
/// Only the sequence of a staple changes once it has been created, when its placeholder bases
/// get assigned.
#[derive(Clone, PartialEq, Eq)]
pub struct Staple {
    /// Index of the row describing this staple in the tile's table.
    pub row: usize,
    pub start: HelixBase,
    pub end: HelixBase,
    sequence: String,
    pub color: String,
    pub category: StapleCategory,
    pub edge: Edge,
}

impl Staple {
    pub fn new(row: usize, data: &StapleRow, category: StapleCategory, edge: Edge) -> Self {
        Self {
            row,
            start: data.start,
            end: data.end,
            sequence: data.sequence.clone(),
            color: data.color.clone(),
            category,
            edge,
        }
    }

    pub fn key(&self) -> StapleKey {
        StapleKey {
            start: self.start,
            end: self.end,
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn set_sequence(&mut self, sequence: String) {
        self.sequence = sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The helix indices of the start and end of the staple
    pub fn helix_indices(&self) -> (isize, isize) {
        (self.start.helix, self.end.helix)
    }

    /// The base indices of the start and end of the staple
    pub fn base_indices(&self) -> (isize, isize) {
        (self.start.base, self.end.base)
    }

    pub fn has_placeholder(&self) -> bool {
        self.sequence.contains(PLACEHOLDER)
    }

    pub fn nb_placeholders(&self) -> usize {
        self.sequence.chars().filter(|c| *c == PLACEHOLDER).count()
    }

    /// The range of characters going from the first to the last placeholder of the sequence.
    pub fn placeholder_span(&self) -> Option<Range<usize>> {
        let chars: Vec<char> = self.sequence.chars().collect();
        let first = chars.iter().position(|c| *c == PLACEHOLDER)?;
        let last = chars.iter().rposition(|c| *c == PLACEHOLDER)?;
        Some(first..(last + 1))
    }

    /// The end of the staple that leaves the scaffold on a side of the tile, i.e. the one with
    /// the largest base index. When both ends have the same base index, the start is returned.
    pub fn side_exit(&self) -> HelixBase {
        if self.start.base >= self.end.base {
            self.start
        } else {
            self.end
        }
    }

    /// Key used to order side overhangs from top to bottom.
    pub fn side_order_key(&self) -> isize {
        if self.start.base > self.end.base {
            self.start.helix
        } else {
            self.end.helix
        }
    }

    /// Key used to order top and bottom overhangs from left to right.
    pub fn edge_order_key(&self) -> isize {
        if self.start.helix > self.end.helix {
            self.start.base
        } else {
            self.end.base
        }
    }

    /// The row of a table describing this staple in its current state.
    pub fn to_row(&self) -> StapleRow {
        StapleRow {
            start: self.start,
            end: self.end,
            sequence: self.sequence.clone(),
            length: self.len(),
            color: self.color.clone(),
        }
    }
}
