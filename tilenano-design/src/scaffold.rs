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
//! Bases complementary to the scaffold of the reference tile, on both sides of the tile.
//!
//! Each table maps a helix index of the raw tile design to the 16 bases complementary to the
//! scaffold at the border of the tile, read from base position 23 down to base position 8.
//! Designs that add empty helices above the addressed region must subtract their shift from the
//! helix index before reading these tables.

use super::Edge;

/// Number of bases stored for each helix.
pub const SCAFFOLD_COMPLEMENT_LEN: usize = 16;

/// Complementary bases to the scaffold on the left side of the tile.
pub const LEFT_SCAFFOLD_COMPLEMENTS: [&str; 24] = [
    "GCAACTGTTGGGAAGG",
    "CCGGGCGTGGCTAGCG",
    "AGACGCAGAAACAGCG",
    "TTTAAATTCAAACTAG",
    "TGCCAACGGCAGCACC",
    "CCTACCGTGGTGGCTG",
    "GCAGTGTCACTGCGCG",
    "GGTGTCTCACGTGTCC",
    "ATTGCGTTGCGCTCAC",
    "CTGACCTTTCGCCCGT",
    "AGGGTTGAGTGTTGTT",
    "AGAACAAGGTTTGACC",
    "GAAACAAACATCAAGA",
    "CATTAATTAAAACAAA",
    "ATGCAAATCCAATCGC",
    "AGCGCAAGAAACAGAA",
    "TTCGAGCCAGTAATAA",
    "CCATGAAATATAAGAG",
    "ACCGCGCCCAATAGCA",
    "GATATAGACTAAACGA",
    "TTTACAGAGAGAATAA",
    "GAAGGGACAAAAATAC",
    "TCCTTATTACGCAGTA",
    "AGATGCAAACGATTGT",
];

/// Complementary bases to the scaffold on the right side of the tile.
pub const RIGHT_SCAFFOLD_COMPLEMENTS: [&str; 24] = [
    "TTCGCGTCTGGCCTTC",
    "AATAAAAACTACCGCA",
    "GATAAATTAATGCCGG",
    "TCGATCTTGCCAACTT",
    "GTAGCATTAACATCCA",
    "ATGATAATCATCTTAA",
    "TTAGAGAGTACCTTTA",
    "AGGACTGGACAACCTC",
    "GTTTTGCCAGAGGGGG",
    "AAGAAAACGTTTTCGG",
    "AACTTTAATCATTGTG",
    "CTTTAATTTGGTAGAG",
    "ATTGTGTCGAAATCCG",
    "AATAGTCCGCTACTAT",
    "AGGCTTGCAGGGAGTT",
    "GTCGCTGGCTTATATA",
    "GTCTTTCCAGACGTTA",
    "CTGTTTTGAAATCTAG",
    "GTTTTGCTCAGTACCA",
    "GGGCGATTAGGATTAG",
    "AGGCAGGTCAGACGAT",
    "GTTGGAGGACAGTTAC",
    "CGTCACCAATGAAACC",
    "AAAGGCCGGAACGATT",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldSide {
    Left,
    Right,
}

impl ScaffoldSide {
    pub fn table(self) -> &'static [&'static str; 24] {
        match self {
            Self::Left => &LEFT_SCAFFOLD_COMPLEMENTS,
            Self::Right => &RIGHT_SCAFFOLD_COMPLEMENTS,
        }
    }

    /// The bases complementary to the scaffold at `helix`, or `None` if the helix is not covered
    /// by the table.
    pub fn complementary_bases(self, helix: isize) -> Option<&'static str> {
        if helix < 0 {
            None
        } else {
            self.table().get(helix as usize).copied()
        }
    }
}

/// How side overhangs are matched to a scaffold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideBinding {
    /// Left overhangs read the left table and right overhangs read the right table.
    SameSide,
    /// Left overhangs read the right table and right overhangs read the left table.
    OppositeSide,
}

impl Default for SideBinding {
    fn default() -> Self {
        Self::SameSide
    }
}

impl SideBinding {
    /// The scaffold side read by the overhangs of `edge`. Only left and right edges bind to the
    /// scaffold.
    pub fn scaffold_side(self, edge: Edge) -> Option<ScaffoldSide> {
        let side = match edge {
            Edge::Left => ScaffoldSide::Left,
            Edge::Right => ScaffoldSide::Right,
            _ => return None,
        };
        Some(match self {
            Self::SameSide => side,
            Self::OppositeSide => side.opposite(),
        })
    }
}

impl ScaffoldSide {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
