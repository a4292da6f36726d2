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
use tilenano_design::complement;

impl<'a, R: Rng> AssignmentRun<'a, R> {
    /// Give to each overhang of the group the complement of the bases of the overhang facing it.
    pub(super) fn pair_group(&mut self, position: TilePosition, edge: Edge) -> Result<(), AssignError> {
        let (neighbour, partner_edge) = self
            .partner(position, edge)
            .ok_or(AssignError::UnknownEdge(edge))?;
        let group = self.group(position, edge);
        let partners = self.group(neighbour, partner_edge);
        if group.len() != partners.len() {
            return Err(AssignError::OverhangCountMismatch {
                position,
                edge,
                count: group.len(),
                neighbour,
                partner_count: partners.len(),
            });
        }

        for (idx, (staple, partner)) in group.iter().zip(partners.iter()).enumerate() {
            let bases = self
                .assigned_bases(neighbour, partner_edge, &partner.key())
                .map(complement)
                .ok_or_else(|| AssignError::MissingAssignedBases {
                    position: neighbour,
                    edge: partner_edge,
                    staple: partner.to_string(),
                })?;
            let even = at_even(edge, staple)?;
            let sequence = insert_bases(staple, &bases, even)?;
            self.record_bases(position, edge, staple.key(), bases);
            self.write_sequence(position, edge, idx, sequence)?;
        }
        Ok(())
    }
}
