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

/// How the overhangs of an edge group get their bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The neighbouring tile has been processed, the overhangs are paired with its overhangs.
    Resolved,
    /// The neighbouring tile has not been processed yet.
    Pending,
    /// There is no tile on that side, the edge is left free.
    Absent,
    /// The overhangs bind to the scaffold of their own tile.
    Scaffold,
    /// The staples of the group are not assigned.
    Passive,
}

impl<'a, R: Rng> AssignmentRun<'a, R> {
    /// The tile facing the edge `edge` of the tile at `position`, and the edge of that tile
    /// that faces `edge`. Returns `None` if there is no such tile.
    pub(super) fn partner(&self, position: TilePosition, edge: Edge) -> Option<(TilePosition, Edge)> {
        if !edge.pairs_with_tile() {
            return None;
        }
        let neighbour = position.neighbour(edge)?;
        let partner_edge = edge.opposite()?;
        if self.staples.contains(&neighbour) {
            Some((neighbour, partner_edge))
        } else {
            None
        }
    }

    pub(super) fn resolve(&self, position: TilePosition, edge: Edge) -> Verdict {
        if edge.binds_scaffold() {
            Verdict::Scaffold
        } else if !edge.pairs_with_tile() {
            Verdict::Passive
        } else if let Some((neighbour, _)) = self.partner(position, edge) {
            match self.record.get(&neighbour) {
                Some(Resolution::Resolved) => Verdict::Resolved,
                _ => Verdict::Pending,
            }
        } else {
            Verdict::Absent
        }
    }

    /// True if the overhangs facing `edge` already have their bases.
    pub(super) fn partner_assigned(&self, position: TilePosition, edge: Edge) -> bool {
        self.partner(position, edge)
            .map(|(neighbour, partner_edge)| {
                self.store
                    .get(&neighbour)
                    .map_or(false, |edges| edges.contains_key(&partner_edge))
            })
            .unwrap_or(false)
    }
}
