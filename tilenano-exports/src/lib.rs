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
//! Exports utilities from TileNano to the staple tables read by the ordering tools.

use regex::Regex;
use std::path::{Path, PathBuf};
use strum::Display;
use tilenano_design::{ExtractedStaples, TiledDesign};

mod added;
mod full;

/// The name given to the exported files when none is provided.
pub const DEFAULT_SAVE_NAME: &str = "demo";

const RESULT_FOLDER_PREFIX: &str = "res_";

/// The kind of exports that are implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExportType {
    /// Only the staples that were extracted from the tiles, with their assigned bases.
    AddedStaples,
    /// The whole staple table of each tile, with the assigned bases.
    FullTables,
}

/// Where and how to write an export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub save_path: PathBuf,
    pub save_name: Option<String>,
    /// Also export the modified staples
    pub include_modified: bool,
}

/// A value returned by the export functions when exports was successfull.
#[derive(Debug)]
pub struct ExportSuccess {
    pub export_type: ExportType,
    pub folder: PathBuf,
    pub files: Vec<PathBuf>,
}

const SUCCESSFUL_EXPORT_MSG_PREFIX: &str = "Succussfully exported";

impl ExportSuccess {
    /// A message telling that the export operation was successfull and giving the folder to which
    /// the export was made
    pub fn message(&self) -> String {
        format!(
            "{SUCCESSFUL_EXPORT_MSG_PREFIX} {} file(s) to\n{}",
            self.files.len(),
            self.folder.to_string_lossy()
        )
    }
}

#[derive(Debug)]
pub enum ExportError {
    CsvError(csv::Error),
    IOError(std::io::Error),
    InvalidPattern(regex::Error),
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::CsvError(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl From<regex::Error> for ExportError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CsvError(e) => write!(f, "Could not write table: {}", e),
            Self::IOError(e) => write!(f, "Could not write export: {}", e),
            Self::InvalidPattern(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExportError {}

pub type ExportResult = Result<ExportSuccess, ExportError>;

/// Write the result of an assignment.
///
/// `staples` must be the staples whose bases have been assigned, and the tables of `design` must
/// contain the assigned sequences.
pub fn export(
    design: &TiledDesign,
    staples: &ExtractedStaples,
    export_type: ExportType,
    options: &ExportOptions,
) -> ExportResult {
    log::info!(
        "Export {} to {}",
        export_type,
        options.save_path.to_string_lossy()
    );
    let ret = match export_type {
        ExportType::AddedStaples => added::export_added_staples(design, staples, options),
        ExportType::FullTables => full::export_full_tables(design, options),
    }?;
    log::info!("{}", ret.message());
    Ok(ret)
}

/// The name of the next result folder in `save_path`: `res_0` if there is no result folder yet,
/// otherwise `res_n` where `n` is one more than the largest existing index.
pub fn next_result_name<P: AsRef<Path>>(save_path: P) -> Result<String, ExportError> {
    let re = Regex::new(&format!(r"^{}(\d+)$", RESULT_FOLDER_PREFIX))?;
    let mut largest: Option<u64> = None;
    if save_path.as_ref().is_dir() {
        for entry in std::fs::read_dir(save_path.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let idx = re
                .captures(&name.to_string_lossy())
                .and_then(|c| c[1].parse::<u64>().ok());
            if let Some(idx) = idx {
                largest = Some(largest.map_or(idx, |l| l.max(idx)));
            }
        }
    }
    let next = largest.map(|l| l + 1).unwrap_or(0);
    Ok(format!("{RESULT_FOLDER_PREFIX}{next}"))
}

/// Create the folder `save_path/result_name` if needed and return its path.
fn prepare_folder(save_path: &Path, result_name: &str) -> Result<PathBuf, ExportError> {
    let folder = save_path.join(result_name);
    std::fs::create_dir_all(&folder)?;
    Ok(folder)
}
