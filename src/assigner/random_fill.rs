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
use tilenano_design::BASES;

impl<'a, R: Rng> AssignmentRun<'a, R> {
    /// Fill the placeholders of each overhang of the group with random bases.
    ///
    /// The bases are written as drawn, but they are recorded in the same direction as paired
    /// bases so that the facing edge can later be paired with them.
    pub(super) fn fill_group_randomly(
        &mut self,
        position: TilePosition,
        edge: Edge,
    ) -> Result<(), AssignError> {
        let group = self.group(position, edge);
        for (idx, staple) in group.iter().enumerate() {
            let run = placeholder_run(staple)?;
            let bases: String = run
                .map(|_| BASES[self.rng.gen_range(0..BASES.len())])
                .collect();
            let sequence = insert_bases(staple, &bases, false)?;
            let recorded = if at_even(edge, staple)? {
                reversed(&bases)
            } else {
                bases
            };
            self.record_bases(position, edge, staple.key(), recorded);
            self.write_sequence(position, edge, idx, sequence)?;
        }
        self.nb_random_fills += 1;
        Ok(())
    }
}
