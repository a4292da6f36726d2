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
//! Per-tile staple tables, as exported by the design software.
//!
//! A table is a CSV file with the columns `Start,End,Sequence,Length,Color`, where `Start` and
//! `End` are written `helix[base]`.

use super::{HelixBase, LoadDesignError, PLACEHOLDER};
use regex::Regex;
use std::io;
use std::path::Path;

pub const TABLE_COLUMNS: [&str; 5] = ["Start", "End", "Sequence", "Length", "Color"];

const POSITION_PATTERN: &str = r"^\s*(-?\d+)\[(-?\d+)\]\s*$";

/// One row of a staple table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StapleRow {
    pub start: HelixBase,
    pub end: HelixBase,
    pub sequence: String,
    pub length: usize,
    pub color: String,
}

#[derive(Serialize, Deserialize)]
struct RawRow {
    #[serde(rename = "Start")]
    start: String,
    #[serde(rename = "End")]
    end: String,
    #[serde(rename = "Sequence")]
    sequence: String,
    #[serde(rename = "Length")]
    length: usize,
    #[serde(rename = "Color")]
    color: String,
}

/// Split a `helix[base]` field into its helix and base indices.
pub struct PositionParser {
    re: Regex,
}

impl PositionParser {
    pub fn new() -> Result<Self, LoadDesignError> {
        Ok(Self {
            re: Regex::new(POSITION_PATTERN)?,
        })
    }

    pub fn parse(&self, field: &str) -> Result<HelixBase, LoadDesignError> {
        let captures = self
            .re
            .captures(field)
            .ok_or_else(|| LoadDesignError::BadPosition(field.to_owned()))?;
        let read = |i: usize| -> Result<isize, LoadDesignError> {
            captures[i]
                .parse()
                .map_err(|_| LoadDesignError::BadPosition(field.to_owned()))
        };
        Ok(HelixBase::new(read(1)?, read(2)?))
    }
}

/// The rows of a tile's staple table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StapleTable {
    rows: Vec<StapleRow>,
}

impl StapleTable {
    pub fn from_rows(rows: Vec<StapleRow>) -> Self {
        Self { rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadDesignError> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| LoadDesignError::IOError(path.as_ref().to_path_buf(), e))?;
        Self::read(file)
    }

    /// Read a table from CSV data. The sequences of the table must already have been assigned,
    /// that is the first row must not be made only of placeholders.
    pub fn read<R: io::Read>(reader: R) -> Result<Self, LoadDesignError> {
        let mut reader = csv::ReaderBuilder::new().delimiter(b',').from_reader(reader);
        let headers = reader.headers()?.clone();
        if headers.len() != TABLE_COLUMNS.len() {
            return Err(LoadDesignError::BadColumns {
                expected: TABLE_COLUMNS.len(),
                actual: headers.len(),
            });
        }
        let parser = PositionParser::new()?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let raw: RawRow = record?;
            rows.push(StapleRow {
                start: parser.parse(&raw.start)?,
                end: parser.parse(&raw.end)?,
                sequence: raw.sequence,
                length: raw.length,
                color: raw.color,
            });
        }
        let first = rows.first().ok_or(LoadDesignError::EmptyTable)?;
        if first.sequence.chars().all(|c| c == PLACEHOLDER) {
            return Err(LoadDesignError::SequencesNotAssigned);
        }
        Ok(Self { rows })
    }

    pub fn write<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_rows(self.rows.iter(), writer)
    }

    pub fn rows(&self) -> &[StapleRow] {
        &self.rows
    }

    pub fn get(&self, row: usize) -> Option<&StapleRow> {
        self.rows.get(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the sequence of a row. Return `None` if there is no such row.
    pub fn set_sequence(&mut self, row: usize, sequence: String) -> Option<()> {
        self.rows.get_mut(row).map(|r| r.sequence = sequence)
    }
}

/// Write rows in the table format, header included.
pub fn write_rows<'a, I, W>(rows: I, writer: W) -> Result<(), csv::Error>
where
    I: Iterator<Item = &'a StapleRow>,
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    let mut wrote_row = false;
    for row in rows {
        writer.serialize(RawRow {
            start: row.start.to_string(),
            end: row.end.to_string(),
            sequence: row.sequence.clone(),
            length: row.length,
            color: row.color.clone(),
        })?;
        wrote_row = true;
    }
    if !wrote_row {
        writer.write_record(&TABLE_COLUMNS)?;
    }
    writer.flush()?;
    Ok(())
}
