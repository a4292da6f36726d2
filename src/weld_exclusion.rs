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
//! Find the wells of a plate order that hold staples replaced by overhangs in the designs.
//!
//! The overhangs of a design extend existing staples. The part of an overhang that is not a
//! placeholder is the sequence of the staple it replaces, so looking that part up in the order
//! gives the wells that must not be used with the design.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tilenano_design::config::ColorSetting;
use tilenano_design::PLACEHOLDER;

/// For each stripped overhang sequence, the tiles in which it appears.
pub type SequencePool = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone)]
pub struct ExclusionOptions {
    pub order: PathBuf,
    pub designs: PathBuf,
    pub config: PathBuf,
    pub output: PathBuf,
    /// Also exclude the wells of the modified staples
    pub include_modified: bool,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Bases")]
    bases: String,
    #[serde(rename = "Sequence")]
    sequence: String,
    #[serde(rename = "Well Position")]
    well_position: String,
}

#[derive(Debug, Serialize)]
struct ExclusionRow<'a> {
    #[serde(rename = "Bases")]
    bases: &'a str,
    #[serde(rename = "Sequence")]
    sequence: &'a str,
    #[serde(rename = "Well Position")]
    well_position: &'a str,
    #[serde(rename = "Exclusion")]
    exclusion: String,
}

#[derive(Debug, Deserialize)]
struct DesignRow {
    #[serde(rename = "Sequence")]
    sequence: String,
    #[serde(rename = "Color")]
    color: String,
}

#[derive(Deserialize)]
struct ColorsOnly {
    colors: ColorSetting,
}

/// Write a copy of the order with an `Exclusion` column. Returns the number of wells that were
/// matched with a tile.
pub fn exclude(options: &ExclusionOptions) -> Result<usize, ExclusionError> {
    let colors = read_colors(&options.config)?;
    let pool = replaced_sequences(&options.designs, &colors, options.include_modified)?;
    log::info!(
        "{} replaced staple sequence(s) found in {}",
        pool.len(),
        options.designs.to_string_lossy()
    );
    let order = std::fs::File::open(&options.order)
        .map_err(|e| ExclusionError::IOError(options.order.clone(), e))?;
    let output = std::fs::File::create(&options.output)
        .map_err(|e| ExclusionError::IOError(options.output.clone(), e))?;
    let nb_matched = mark_exclusions(order, output, &pool)?;
    log::info!(
        "{} well(s) to exclude, written to {}",
        nb_matched,
        options.output.to_string_lossy()
    );
    Ok(nb_matched)
}

/// Read the staple colors of a design configuration, ignoring the rest of the file.
pub fn read_colors<P: AsRef<Path>>(path: P) -> Result<ColorSetting, ExclusionError> {
    let json_str = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ExclusionError::IOError(path.as_ref().to_path_buf(), e))?;
    let config: ColorsOnly = serde_json::from_str(&json_str)?;
    Ok(config.colors)
}

/// Collect the sequences of the staples replaced by overhangs in all the csv files of
/// `designs_dir`.
pub fn replaced_sequences<P: AsRef<Path>>(
    designs_dir: P,
    colors: &ColorSetting,
    include_modified: bool,
) -> Result<SequencePool, ExclusionError> {
    let dir = designs_dir.as_ref();
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ExclusionError::IOError(dir.to_path_buf(), e))? {
        let path = entry
            .map_err(|e| ExclusionError::IOError(dir.to_path_buf(), e))?
            .path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            paths.push(path);
        }
    }
    paths.sort();

    let label_re = Regex::new(r"\([^)]*\)")?;
    let mut pool = SequencePool::new();
    for path in paths {
        let file_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let label = label_re
            .find(&file_name)
            .map(|m| m.as_str().to_owned())
            .unwrap_or_else(|| file_name.clone());
        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| ExclusionError::CsvError(path.clone(), e))?;
        for row in reader.deserialize() {
            let row: DesignRow = row.map_err(|e| ExclusionError::CsvError(path.clone(), e))?;
            if is_replaced(&row, colors, include_modified) {
                let kept: String = row.sequence.chars().filter(|c| *c != PLACEHOLDER).collect();
                pool.entry(kept).or_default().push(label.clone());
            }
        }
    }
    Ok(pool)
}

fn is_replaced(row: &DesignRow, colors: &ColorSetting, include_modified: bool) -> bool {
    if row.color == colors.side_overhang {
        return false;
    }
    row.sequence.contains(PLACEHOLDER)
        || (include_modified && colors.modified_staples.as_deref() == Some(row.color.as_str()))
}

/// Copy the order from `order` to `output` with an additional `Exclusion` column holding the
/// tiles in which the staple of the well is replaced.
pub fn mark_exclusions<R: io::Read, W: io::Write>(
    order: R,
    output: W,
    pool: &SequencePool,
) -> Result<usize, ExclusionError> {
    let mut reader = csv::Reader::from_reader(order);
    let mut writer = csv::Writer::from_writer(output);
    let mut nb_matched = 0;
    for row in reader.deserialize() {
        let row: OrderRow = row.map_err(|e| ExclusionError::CsvError(PathBuf::new(), e))?;
        let sequence: String = row.sequence.split(' ').collect();
        let exclusion = match pool.get(&sequence) {
            Some(tiles) => {
                nb_matched += 1;
                tiles.join(", ")
            }
            None => {
                log::warn!(
                    "Staple with sequence {} does not match any replaced staple",
                    sequence
                );
                String::new()
            }
        };
        writer
            .serialize(ExclusionRow {
                bases: &row.bases,
                sequence: &sequence,
                well_position: &row.well_position,
                exclusion,
            })
            .map_err(|e| ExclusionError::CsvError(PathBuf::new(), e))?;
    }
    writer
        .flush()
        .map_err(|e| ExclusionError::IOError(PathBuf::new(), e))?;
    Ok(nb_matched)
}

#[derive(Debug)]
pub enum ExclusionError {
    IOError(PathBuf, io::Error),
    CsvError(PathBuf, csv::Error),
    JsonError(serde_json::Error),
    InvalidPattern(regex::Error),
}

impl From<serde_json::Error> for ExclusionError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError(e)
    }
}

impl From<regex::Error> for ExclusionError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}

impl fmt::Display for ExclusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IOError(path, e) if path.as_os_str().is_empty() => write!(f, "{}", e),
            Self::IOError(path, e) => write!(f, "{}: {}", path.to_string_lossy(), e),
            Self::CsvError(path, e) if path.as_os_str().is_empty() => {
                write!(f, "Could not read order: {}", e)
            }
            Self::CsvError(path, e) => write!(f, "{}: {}", path.to_string_lossy(), e),
            Self::JsonError(e) => write!(f, "Could not read colors: {}", e),
            Self::InvalidPattern(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExclusionError {}
