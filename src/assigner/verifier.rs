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
    /// Check that every side overhang is complementary to the scaffold and that every pair of
    /// facing overhangs is complementary.
    pub(super) fn verify(&self) -> Result<(), AssignError> {
        for (position, groups) in self.staples.iter() {
            for (edge, group) in groups.iter() {
                if edge.binds_scaffold() {
                    for staple in group.iter() {
                        self.verify_scaffold_binding(*position, *edge, staple)?;
                    }
                } else if let Some((neighbour, partner_edge)) = self.partner(*position, *edge) {
                    let partners = self.group(neighbour, partner_edge);
                    if partners.len() != group.len() {
                        return Err(AssignError::OverhangCountMismatch {
                            position: *position,
                            edge: *edge,
                            count: group.len(),
                            neighbour,
                            partner_count: partners.len(),
                        });
                    }
                    for (staple, partner) in group.iter().zip(partners.iter()) {
                        self.verify_pairing(
                            (*position, *edge, staple),
                            (neighbour, partner_edge, partner),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn recorded_bases(
        &self,
        position: TilePosition,
        edge: Edge,
        staple: &Staple,
    ) -> Result<&str, AssignError> {
        self.assigned_bases(position, edge, &staple.key())
            .ok_or_else(|| AssignError::MissingAssignedBases {
                position,
                edge,
                staple: staple.to_string(),
            })
    }

    fn verify_scaffold_binding(
        &self,
        position: TilePosition,
        edge: Edge,
        staple: &Staple,
    ) -> Result<(), AssignError> {
        let assigned = self.recorded_bases(position, edge, staple)?;
        let (helix, expected) = self.scaffold_bases(position, edge, staple)?;
        if assigned != expected {
            return Err(AssignError::ScaffoldMismatch {
                staple: staple.to_string(),
                assigned: assigned.to_owned(),
                helix,
                scaffold: complement(&expected),
            });
        }
        Ok(())
    }

    fn verify_pairing(
        &self,
        (position, edge, staple): (TilePosition, Edge, &Staple),
        (neighbour, partner_edge, partner): (TilePosition, Edge, &Staple),
    ) -> Result<(), AssignError> {
        let assigned = self.recorded_bases(position, edge, staple)?;
        let expected = complement(self.recorded_bases(neighbour, partner_edge, partner)?);
        if assigned != expected {
            return Err(AssignError::PairingMismatch {
                staple: staple.to_string(),
                assigned: assigned.to_owned(),
                partner: partner.to_string(),
                expected,
            });
        }
        Ok(())
    }
}
