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
//! The configuration file describing a tiled design.
//!
//! ```json
//! {
//!     "size_x": 1,
//!     "size_y": 2,
//!     "csv_root_path": "sequence_files",
//!     "colors": {
//!         "data_bit": "#00ff10",
//!         "side_overhang": "#aa00ff",
//!         "other_overhang": "#03b6a2",
//!         "modified_staples": "#000000"
//!     },
//!     "DNA_origami": {
//!         "upper": {"path": "upper.csv", "x": 0, "y": 0, "shift": 0},
//!         "lower": {"path": "lower.csv", "x": 0, "y": -1}
//!     }
//! }
//! ```
//!
//! The tiles are kept in the order in which they appear in the file.

use super::{LoadDesignError, SideBinding, StapleCategory};
use std::path::{Path, PathBuf};

/// The colors identifying the role of the staples of the tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSetting {
    pub data_bit: String,
    pub side_overhang: String,
    pub other_overhang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_staples: Option<String>,
}

impl ColorSetting {
    pub fn category(&self, color: &str) -> StapleCategory {
        if color == self.side_overhang {
            StapleCategory::SideOverhang
        } else if color == self.other_overhang {
            StapleCategory::EdgeOverhang
        } else if self.modified_staples.as_deref() == Some(color) {
            StapleCategory::Modified
        } else if color == self.data_bit {
            StapleCategory::DataBit
        } else {
            StapleCategory::Plain
        }
    }

    /// True if `color` is one of the colors of the setting.
    pub fn knows(&self, color: &str) -> bool {
        self.category(color) != StapleCategory::Plain
    }
}

/// The description of one tile in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    /// Path of the tile's staple table, relative to the csv root path.
    pub path: PathBuf,
    pub x: isize,
    pub y: isize,
    /// Number of unused helices added above the addressed region of the tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<isize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    pub size_x: usize,
    pub size_y: usize,
    #[serde(default)]
    pub csv_root_path: PathBuf,
    pub colors: ColorSetting,
    #[serde(default)]
    pub side_binding: SideBinding,
    #[serde(rename = "DNA_origami")]
    origami: serde_json::Map<String, serde_json::Value>,
}

impl DesignConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadDesignError> {
        let json_str = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LoadDesignError::IOError(path.as_ref().to_path_buf(), e))?;
        let mut config = Self::from_json(&json_str)?;
        if config.csv_root_path.is_relative() {
            if let Some(parent) = path.as_ref().parent() {
                config.csv_root_path = parent.join(&config.csv_root_path);
            }
        }
        Ok(config)
    }

    pub fn from_json(json_str: &str) -> Result<Self, LoadDesignError> {
        let config: Self = serde_json::from_str(json_str)?;
        let nb_tiles = config.origami.len();
        if nb_tiles != config.size_x * config.size_y {
            return Err(LoadDesignError::WrongNumberOfTiles {
                expected: config.size_x * config.size_y,
                actual: nb_tiles,
            });
        }
        Ok(config)
    }

    /// The named tiles, in file order.
    pub fn tiles(&self) -> Result<Vec<(String, TileEntry)>, LoadDesignError> {
        let mut ret = Vec::with_capacity(self.origami.len());
        for (name, value) in self.origami.iter() {
            let entry: TileEntry = serde_json::from_value(value.clone())
                .map_err(|e| LoadDesignError::BadTileEntry(name.clone(), e))?;
            ret.push((name.clone(), entry));
        }
        Ok(ret)
    }

    pub fn table_path(&self, entry: &TileEntry) -> PathBuf {
        self.csv_root_path.join(&entry.path)
    }
}
