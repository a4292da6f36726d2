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
use std::fs::File;
use tilenano_design::{Edge, Staple};

/// Write, for each tile, the extracted staples with their assigned sequences.
pub(super) fn export_added_staples(
    design: &TiledDesign,
    staples: &ExtractedStaples,
    options: &ExportOptions,
) -> ExportResult {
    let result_name = next_result_name(&options.save_path)?;
    let folder = prepare_folder(&options.save_path, &result_name)?;
    let save_name = options
        .save_name
        .as_deref()
        .unwrap_or(DEFAULT_SAVE_NAME);

    let mut files = Vec::with_capacity(staples.len());
    for (position, groups) in staples.iter() {
        if let Some(tile) = design.get(position) {
            log::info!("Origami {} at position {}", tile.name, position);
        }
        let path = folder.join(format!("{}_{}.csv", save_name, position));
        let rows: Vec<_> = groups
            .iter()
            .filter(|(edge, _)| **edge != Edge::Modified || options.include_modified)
            .flat_map(|(edge, group)| {
                log::debug!("Write {} staple(s) of the {} edge", group.len(), edge);
                group.iter().map(Staple::to_row)
            })
            .collect();
        let file = File::create(&path)?;
        tilenano_design::write_rows(rows.iter(), file)?;
        log::info!("Wrote {}", path.to_string_lossy());
        files.push(path);
    }

    Ok(ExportSuccess {
        export_type: ExportType::AddedStaples,
        folder,
        files,
    })
}
