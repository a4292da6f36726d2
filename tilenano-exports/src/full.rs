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

/// Write a copy of the whole table of each tile, in which the overhangs have their assigned
/// sequences.
pub(super) fn export_full_tables(design: &TiledDesign, options: &ExportOptions) -> ExportResult {
    let result_name = match options.save_name.as_ref() {
        Some(name) => name.clone(),
        None => next_result_name(&options.save_path)?,
    };
    let folder = prepare_folder(&options.save_path, &result_name)?;

    let mut files = Vec::with_capacity(design.nb_tiles());
    for tile in design.tiles() {
        log::info!("Origami {} at position {}", tile.name, tile.position);
        let path = folder.join(format!("all_staples_{}_{}.csv", tile.position, result_name));
        tile.table.write(File::create(&path)?)?;
        log::info!("Wrote {}", path.to_string_lossy());
        files.push(path);
    }
    log::info!(
        "Finished writing all {} tables to {}",
        files.len(),
        folder.to_string_lossy()
    );

    Ok(ExportSuccess {
        export_type: ExportType::FullTables,
        folder,
        files,
    })
}
