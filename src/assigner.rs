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
//! Assignment of the placeholder bases of the overhangs of a tiled design.
//!
//! An [AssignmentRun] is created for each assignment. It works on copies of the staples and
//! tables of the design, so that nothing is written to the design unless the whole assignment
//! succeeded and was verified.
//!
//! Top and bottom overhangs are paired with the facing overhangs of the neighbouring tile when
//! those already have their bases, and filled with random bases otherwise. Left and right
//! overhangs bind to the scaffold and read their bases in the scaffold lookup tables.

use ahash::AHashMap;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use tilenano_design::{
    reversed, Edge, ExtractedStaples, Staple, StapleKey, StapleTable, TilePosition, TiledDesign,
};

mod edge_resolver;
mod pairing;
mod random_fill;
mod scaffold_binding;
mod verifier;

pub use edge_resolver::Verdict;

#[cfg(test)]
mod tests;

/// For each tile and each edge, the bases that were written in the placeholders of the
/// overhangs, in the direction going from the smaller to the larger base index.
pub type AssignedStore = BTreeMap<TilePosition, BTreeMap<Edge, BTreeMap<StapleKey, String>>>;

/// For each tile and each edge, the complete sequences of the staples once assigned.
pub type FinishedStaples = BTreeMap<TilePosition, BTreeMap<Edge, Vec<String>>>;

/// The order in which top and bottom overhangs are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Visit the tiles once, in the order of the design. An edge is paired with its neighbour
    /// only if the neighbour was visited before, otherwise it gets random bases.
    Sweep,
    /// Pair every edge whose partner edge has been assigned, until no edge can be paired. The
    /// first edge that is still waiting then gets random bases and the pairing resumes.
    FixedPoint,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Sweep
    }
}

/// Whether a tile has been processed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Pending,
    Resolved,
}

pub struct AssignmentRun<'a, R: Rng> {
    design: &'a TiledDesign,
    staples: ExtractedStaples,
    tables: BTreeMap<TilePosition, StapleTable>,
    record: AHashMap<TilePosition, Resolution>,
    store: AssignedStore,
    rng: R,
    fill_free_edges: bool,
    nb_random_fills: usize,
}

/// The result of a verified assignment.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// The extracted staples, with their assigned sequences.
    pub staples: ExtractedStaples,
    pub tables: BTreeMap<TilePosition, StapleTable>,
    pub store: AssignedStore,
    pub finished: FinishedStaples,
    /// Number of edge groups that were filled with random bases.
    pub nb_random_fills: usize,
}

impl AssignmentOutcome {
    /// Write the assigned tables into the tiles of `design`.
    pub fn commit(&self, design: &mut TiledDesign) {
        for (position, table) in self.tables.iter() {
            if let Some(tile) = design.get_mut(position) {
                tile.table = table.clone();
            } else {
                log::warn!("No tile at position {}, table not written", position);
            }
        }
    }
}

impl<'a, R: Rng> AssignmentRun<'a, R> {
    pub fn new(design: &'a TiledDesign, staples: &ExtractedStaples, rng: R) -> Self {
        let tables = design
            .tiles()
            .map(|t| (t.position, t.table.clone()))
            .collect();
        let mut record = AHashMap::default();
        for position in staples.positions() {
            record.insert(*position, Resolution::Pending);
        }
        Self {
            design,
            staples: staples.clone(),
            tables,
            record,
            store: Default::default(),
            rng,
            fill_free_edges: false,
            nb_random_fills: 0,
        }
    }

    /// Also give random bases to the overhangs of the edges that have no neighbouring tile.
    /// By default these edges are left free, with their placeholders.
    pub fn fill_free_edges(mut self, fill: bool) -> Self {
        self.fill_free_edges = fill;
        self
    }

    /// Assign the bases of all the overhangs and verify the result.
    pub fn run(mut self, strategy: Strategy) -> Result<AssignmentOutcome, AssignError> {
        self.assign(strategy)?;
        self.verify()?;
        log::info!(
            "Verified the assignment of {} tile(s), {} edge(s) filled with random bases",
            self.staples.len(),
            self.nb_random_fills
        );
        let finished = self.finished_staples();
        Ok(AssignmentOutcome {
            staples: self.staples,
            tables: self.tables,
            store: self.store,
            finished,
            nb_random_fills: self.nb_random_fills,
        })
    }

    fn assign(&mut self, strategy: Strategy) -> Result<(), AssignError> {
        self.check_group_lengths()?;
        log::info!("Assigning bases with strategy {:?}", strategy);
        match strategy {
            Strategy::Sweep => self.sweep(),
            Strategy::FixedPoint => self.fixed_point(),
        }
    }

    /// Fail if two facing edge groups do not have the same number of overhangs.
    fn check_group_lengths(&self) -> Result<(), AssignError> {
        for (position, groups) in self.staples.iter() {
            for (edge, group) in groups.iter() {
                if let Some((neighbour, partner_edge)) = self.partner(*position, *edge) {
                    let partner_count = self
                        .staples
                        .group(&neighbour, partner_edge)
                        .map(Vec::len)
                        .unwrap_or(0);
                    if partner_count != group.len() {
                        return Err(AssignError::OverhangCountMismatch {
                            position: *position,
                            edge: *edge,
                            count: group.len(),
                            neighbour,
                            partner_count,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn sweep(&mut self) -> Result<(), AssignError> {
        let positions: Vec<TilePosition> = self.staples.positions().cloned().collect();
        for position in positions {
            self.process_tile(position)?;
        }
        Ok(())
    }

    fn process_tile(&mut self, position: TilePosition) -> Result<(), AssignError> {
        log::info!("Processing tile at position {}", position);
        let edges = self.edges(position);
        if edges.is_empty() {
            log::info!(
                "Tile at position {} has no overhang, no base assignment is done for it",
                position
            );
        }
        for edge in edges {
            let verdict = self.resolve(position, edge);
            if edge.pairs_with_tile() {
                log::debug!("{} edge of tile {}: {:?}", edge, position, verdict);
            }
            match verdict {
                Verdict::Resolved => self.pair_group(position, edge)?,
                Verdict::Pending => self.fill_group_randomly(position, edge)?,
                Verdict::Scaffold => self.bind_group_to_scaffold(position, edge)?,
                Verdict::Absent if self.fill_free_edges => {
                    self.fill_group_randomly(position, edge)?
                }
                Verdict::Absent | Verdict::Passive => (),
            }
        }
        self.record.insert(position, Resolution::Resolved);
        Ok(())
    }

    fn fixed_point(&mut self) -> Result<(), AssignError> {
        let mut waiting = Vec::new();
        let positions: Vec<TilePosition> = self.staples.positions().cloned().collect();
        for position in positions {
            log::info!("Processing tile at position {}", position);
            for edge in self.edges(position) {
                match self.resolve(position, edge) {
                    Verdict::Scaffold => self.bind_group_to_scaffold(position, edge)?,
                    Verdict::Resolved | Verdict::Pending => waiting.push((position, edge)),
                    Verdict::Absent if self.fill_free_edges => {
                        self.fill_group_randomly(position, edge)?
                    }
                    Verdict::Absent | Verdict::Passive => (),
                }
            }
            self.record.insert(position, Resolution::Resolved);
        }

        while !waiting.is_empty() {
            let mut still_waiting = Vec::with_capacity(waiting.len());
            for (position, edge) in waiting.iter().cloned() {
                if self.partner_assigned(position, edge) {
                    self.pair_group(position, edge)?;
                } else {
                    still_waiting.push((position, edge));
                }
            }
            if still_waiting.len() == waiting.len() {
                let (position, edge) = still_waiting.remove(0);
                log::debug!(
                    "No edge can be paired, {} edge of tile {} gets random bases",
                    edge,
                    position
                );
                self.fill_group_randomly(position, edge)?;
            }
            waiting = still_waiting;
        }
        Ok(())
    }

    fn edges(&self, position: TilePosition) -> Vec<Edge> {
        self.staples
            .get(&position)
            .map(|groups| groups.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn group(&self, position: TilePosition, edge: Edge) -> Vec<Staple> {
        self.staples
            .group(&position, edge)
            .cloned()
            .unwrap_or_default()
    }

    fn assigned_bases(&self, position: TilePosition, edge: Edge, key: &StapleKey) -> Option<&str> {
        self.store
            .get(&position)
            .and_then(|edges| edges.get(&edge))
            .and_then(|bases| bases.get(key))
            .map(String::as_str)
    }

    fn record_bases(&mut self, position: TilePosition, edge: Edge, key: StapleKey, bases: String) {
        self.store
            .entry(position)
            .or_default()
            .entry(edge)
            .or_default()
            .insert(key, bases);
    }

    /// Write the new sequence of the `idx`-th staple of a group, both in the staple and in the
    /// row of the table that describes it.
    fn write_sequence(
        &mut self,
        position: TilePosition,
        edge: Edge,
        idx: usize,
        sequence: String,
    ) -> Result<(), AssignError> {
        let staple = self
            .staples
            .group_mut(&position, edge)
            .and_then(|group| group.get_mut(idx))
            .ok_or(AssignError::StapleNotInTable { position, row: idx })?;
        let row = staple.row;
        staple.set_sequence(sequence.clone());
        self.tables
            .get_mut(&position)
            .and_then(|table| table.set_sequence(row, sequence))
            .ok_or(AssignError::StapleNotInTable { position, row })
    }

    fn finished_staples(&self) -> FinishedStaples {
        let mut ret = FinishedStaples::new();
        for (position, groups) in self.staples.iter() {
            let finished = ret.entry(*position).or_default();
            for (edge, group) in groups.iter() {
                if !self.fill_free_edges && self.resolve(*position, *edge) == Verdict::Absent {
                    continue;
                }
                finished.insert(
                    *edge,
                    group.iter().map(|s| s.sequence().to_owned()).collect(),
                );
            }
        }
        ret
    }
}

/// Whether the placeholders of a staple of a top or bottom edge must be filled in reverse
/// order.
///
/// Staples on even helices are read from the larger to the smaller base index and staples on
/// odd helices from the smaller to the larger one. The helix that matters is the one at the end
/// of the staple that leaves the tile: the smallest helix index for top edges and the largest
/// one for bottom edges.
fn at_even(edge: Edge, staple: &Staple) -> Result<bool, AssignError> {
    let (h1, h2) = staple.helix_indices();
    let helix = match edge {
        Edge::Top => h1.min(h2),
        Edge::Bottom => h1.max(h2),
        _ => return Err(AssignError::UnknownEdge(edge)),
    };
    Ok(helix.rem_euclid(2) == 0)
}

/// The characters of the placeholder run of a staple. The run must be contiguous.
fn placeholder_run(staple: &Staple) -> Result<Range<usize>, AssignError> {
    match staple.placeholder_span() {
        Some(span) if span.len() != staple.nb_placeholders() => {
            Err(AssignError::NonContiguousPlaceholders {
                staple: staple.to_string(),
            })
        }
        Some(span) => Ok(span),
        None => Ok(0..0),
    }
}

/// The sequence of `staple` once its placeholders are replaced by `bases`, read backward if
/// `even`.
fn insert_bases(staple: &Staple, bases: &str, even: bool) -> Result<String, AssignError> {
    let run = placeholder_run(staple)?;
    let nb_bases = bases.chars().count();
    if run.len() != nb_bases {
        return Err(AssignError::PlaceholderMismatch {
            staple: staple.to_string(),
            placeholders: run.len(),
            bases: nb_bases,
        });
    }
    let fill = if even {
        reversed(bases)
    } else {
        bases.to_owned()
    };
    let chars: Vec<char> = staple.sequence().chars().collect();
    let mut ret: String = chars[..run.start].iter().collect();
    ret.push_str(&fill);
    ret.extend(chars[run.end..].iter());
    Ok(ret)
}

/// An error that aborts an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// Two facing edges do not have the same number of overhangs.
    OverhangCountMismatch {
        position: TilePosition,
        edge: Edge,
        count: usize,
        neighbour: TilePosition,
        partner_count: usize,
    },
    /// The number of placeholders of a staple differs from the number of bases to write.
    PlaceholderMismatch {
        staple: String,
        placeholders: usize,
        bases: usize,
    },
    /// The placeholders of a staple are separated by other bases.
    NonContiguousPlaceholders { staple: String },
    /// The orientation of the staples of this edge cannot be determined.
    UnknownEdge(Edge),
    /// No bases were recorded for a staple that should have been assigned.
    MissingAssignedBases {
        position: TilePosition,
        edge: Edge,
        staple: String,
    },
    /// The helix at which a side overhang leaves the tile is not in the scaffold table.
    UnknownScaffoldHelix {
        position: TilePosition,
        staple: String,
        helix: isize,
    },
    StapleNotInTable { position: TilePosition, row: usize },
    /// Verification failure: a side overhang is not complementary to the scaffold.
    ScaffoldMismatch {
        staple: String,
        assigned: String,
        helix: isize,
        scaffold: String,
    },
    /// Verification failure: two facing overhangs are not complementary.
    PairingMismatch {
        staple: String,
        assigned: String,
        partner: String,
        expected: String,
    },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverhangCountMismatch {
                position,
                edge,
                count,
                neighbour,
                partner_count,
            } => write!(
                f,
                "Cannot pair the {} overhang(s) of the {} edge of tile {} with the {} overhang(s) of tile {}",
                count, edge, position, partner_count, neighbour
            ),
            Self::PlaceholderMismatch {
                staple,
                placeholders,
                bases,
            } => write!(
                f,
                "Cannot write {} bases in the {} placeholders of\n{}",
                bases, placeholders, staple
            ),
            Self::NonContiguousPlaceholders { staple } => {
                write!(f, "The placeholders of\n{}\nare not contiguous", staple)
            }
            Self::UnknownEdge(edge) => {
                write!(f, "Unknown orientation for the staples of the {} edge", edge)
            }
            Self::MissingAssignedBases {
                position,
                edge,
                staple,
            } => write!(
                f,
                "No bases assigned for the {} edge of tile {}:\n{}",
                edge, position, staple
            ),
            Self::UnknownScaffoldHelix {
                position,
                staple,
                helix,
            } => write!(
                f,
                "Tile {}: no scaffold bases known for helix {}\n{}",
                position, helix, staple
            ),
            Self::StapleNotInTable { position, row } => {
                write!(f, "Tile {}: no staple at row {}", position, row)
            }
            Self::ScaffoldMismatch {
                staple,
                assigned,
                helix,
                scaffold,
            } => write!(
                f,
                "Not complementary to the scaffold:\n{}\nAssigned bases: {}\nScaffold helix: {}\nScaffold bases: {}",
                staple, assigned, helix, scaffold
            ),
            Self::PairingMismatch {
                staple,
                assigned,
                partner,
                expected,
            } => write!(
                f,
                "Not complementary:\n{}\nAssigned bases: {}\n{}\nPaired bases:   {}",
                staple, assigned, partner, expected
            ),
        }
    }
}

impl std::error::Error for AssignError {}
