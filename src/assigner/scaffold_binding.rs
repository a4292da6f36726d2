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

impl<'a, R: Rng> AssignmentRun<'a, R> {
    /// The shift of the tile. When it is not given in the configuration, tiles with a top edge
    /// are assumed to have two empty helices above their addressed region.
    pub(super) fn shift(&self, position: TilePosition) -> isize {
        let configured = self.design.get(&position).and_then(|tile| tile.shift);
        configured.unwrap_or_else(|| {
            if self.staples.group(&position, Edge::Top).is_some() {
                2
            } else {
                0
            }
        })
    }

    /// The scaffold helix to which a side overhang binds and the bases that it must carry, read
    /// from the smaller to the larger base index.
    pub(super) fn scaffold_bases(
        &self,
        position: TilePosition,
        edge: Edge,
        staple: &Staple,
    ) -> Result<(isize, String), AssignError> {
        let side = self
            .design
            .side_binding
            .scaffold_side(edge)
            .ok_or(AssignError::UnknownEdge(edge))?;
        let helix = staple.side_exit().helix - self.shift(position);
        let entry = side
            .complementary_bases(helix)
            .ok_or_else(|| AssignError::UnknownScaffoldHelix {
                position,
                staple: staple.to_string(),
                helix,
            })?;
        Ok((helix, reversed(entry)))
    }

    /// Fill the placeholders of each side overhang of the group with the bases complementary to
    /// the scaffold.
    pub(super) fn bind_group_to_scaffold(
        &mut self,
        position: TilePosition,
        edge: Edge,
    ) -> Result<(), AssignError> {
        let group = self.group(position, edge);
        for (idx, staple) in group.iter().enumerate() {
            let (helix, bases) = self.scaffold_bases(position, edge, staple)?;
            let even = helix.rem_euclid(2) == 0;
            let sequence = insert_bases(staple, &bases, even)?;
            log::debug!("Tile {}: {:?} binds to scaffold helix {}", position, staple, helix);
            self.record_bases(position, edge, staple.key(), bases);
            self.write_sequence(position, edge, idx, sequence)?;
        }
        Ok(())
    }
}
