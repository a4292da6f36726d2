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
//! This crate defines the data model of tiled DNA origami designs.
//!
//! A design is a grid of tiles. Each tile is an origami whose staples are listed in a table.
//! Some staples are overhangs whose sequences still contain placeholder bases; they are meant to
//! bind the tile to its neighbours or to the scaffold once their bases have been assigned.
use std::fmt;
use std::path::{Path, PathBuf};

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod bases;
pub use bases::*;
pub mod config;
use config::{ColorSetting, DesignConfig};
mod extraction;
pub use extraction::*;
pub mod scaffold;
pub use scaffold::{ScaffoldSide, SideBinding};
mod staples;
pub use staples::*;
mod table;
pub use table::*;

use ahash::AHashMap;

#[cfg(test)]
mod tests;

/// The position of a tile in the grid. `y` grows toward the top of the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: isize,
    pub y: isize,
}

impl TilePosition {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    pub fn above(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    pub fn below(&self) -> Self {
        Self {
            y: self.y - 1,
            ..*self
        }
    }

    /// The position of the tile facing the `edge` of this tile, if `edge` faces another tile.
    pub fn neighbour(&self, edge: Edge) -> Option<Self> {
        match edge {
            Edge::Top => Some(self.above()),
            Edge::Bottom => Some(self.below()),
            _ => None,
        }
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One origami of the design.
#[derive(Debug, Clone)]
pub struct Tile {
    pub name: String,
    pub position: TilePosition,
    /// Number of unused helices above the addressed region, if it was given in the
    /// configuration.
    pub shift: Option<isize>,
    original: StapleTable,
    /// The staple table in which the assigned bases are written.
    pub table: StapleTable,
}

impl Tile {
    pub fn new(name: String, position: TilePosition, shift: Option<isize>, table: StapleTable) -> Self {
        Self {
            name,
            position,
            shift,
            original: table.clone(),
            table,
        }
    }

    /// The table as it was read, before any assignment.
    pub fn original_table(&self) -> &StapleTable {
        &self.original
    }
}

/// A grid of tiles.
#[derive(Debug, Clone)]
pub struct TiledDesign {
    pub size: (usize, usize),
    pub colors: ColorSetting,
    pub side_binding: SideBinding,
    tiles: Vec<Tile>,
    index: AHashMap<TilePosition, usize>,
}

impl TiledDesign {
    pub fn new(size: (usize, usize), colors: ColorSetting, side_binding: SideBinding) -> Self {
        Self {
            size,
            colors,
            side_binding,
            tiles: Vec::new(),
            index: Default::default(),
        }
    }

    /// Load a design from its configuration file. The tables of the tiles are read from the csv
    /// root path given in the configuration.
    pub fn from_config_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadDesignError> {
        let config = DesignConfig::from_path(path)?;
        let mut design = Self::new(
            (config.size_x, config.size_y),
            config.colors.clone(),
            config.side_binding,
        );
        for (name, entry) in config.tiles()? {
            let table = StapleTable::from_path(config.table_path(&entry))?;
            for row in table.rows() {
                if !design.colors.knows(&row.color) {
                    log::warn!("Tile {}: unknown staple color {}", name, row.color);
                }
            }
            let position = TilePosition::new(entry.x, entry.y);
            log::info!("Loaded tile {} at position {}", name, position);
            design.add_tile(Tile::new(name, position, entry.shift, table))?;
        }
        Ok(design)
    }

    pub fn add_tile(&mut self, tile: Tile) -> Result<(), LoadDesignError> {
        if self.index.contains_key(&tile.position) {
            return Err(LoadDesignError::DuplicatePosition(tile.position));
        }
        self.index.insert(tile.position, self.tiles.len());
        self.tiles.push(tile);
        Ok(())
    }

    /// The tiles, in the order of the configuration file.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    pub fn get(&self, position: &TilePosition) -> Option<&Tile> {
        self.index.get(position).map(|idx| &self.tiles[*idx])
    }

    pub fn get_mut(&mut self, position: &TilePosition) -> Option<&mut Tile> {
        let idx = *self.index.get(position)?;
        Some(&mut self.tiles[idx])
    }

    pub fn nb_tiles(&self) -> usize {
        self.tiles.len()
    }
}

/// An error that occured while loading a design.
#[derive(Debug)]
pub enum LoadDesignError {
    IOError(PathBuf, std::io::Error),
    JsonError(serde_json::Error),
    BadTileEntry(String, serde_json::Error),
    CsvError(csv::Error),
    InvalidPattern(regex::Error),
    /// A position field that is not of the form `helix[base]`
    BadPosition(String),
    BadColumns {
        expected: usize,
        actual: usize,
    },
    EmptyTable,
    SequencesNotAssigned,
    WrongNumberOfTiles {
        expected: usize,
        actual: usize,
    },
    DuplicatePosition(TilePosition),
}

impl From<serde_json::Error> for LoadDesignError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError(e)
    }
}

impl From<csv::Error> for LoadDesignError {
    fn from(e: csv::Error) -> Self {
        Self::CsvError(e)
    }
}

impl From<regex::Error> for LoadDesignError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}

impl fmt::Display for LoadDesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IOError(path, e) => write!(f, "Could not read {}: {}", path.display(), e),
            Self::JsonError(e) => write!(f, "Incorrect data in configuration file: {}", e),
            Self::BadTileEntry(name, e) => {
                write!(f, "Missing or incorrect data for tile {}: {}", name, e)
            }
            Self::CsvError(e) => write!(f, "Incorrect data in CSV file: {}", e),
            Self::InvalidPattern(e) => write!(f, "{}", e),
            Self::BadPosition(field) => {
                write!(f, "Position {:?} is not of the form helix[base]", field)
            }
            Self::BadColumns { expected, actual } => write!(
                f,
                "Staple table has {} columns, {} expected",
                actual, expected
            ),
            Self::EmptyTable => write!(f, "Staple table has no rows"),
            Self::SequencesNotAssigned => {
                write!(f, "Sequences have not been assigned for the origami design")
            }
            Self::WrongNumberOfTiles { expected, actual } => write!(
                f,
                "Number of origami is incorrect: {} given, {} expected",
                actual, expected
            ),
            Self::DuplicatePosition(position) => {
                write!(f, "Two tiles share the position {}", position)
            }
        }
    }
}

impl std::error::Error for LoadDesignError {}
