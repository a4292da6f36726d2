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
//! TileNano assigns the bases of the overhangs that bind the tiles of a DNA origami assembly.
//!
//! `tilenano assign` loads a tiled design, assigns the placeholder bases of its overhangs,
//! verifies the assignment and writes the resulting staple tables. `tilenano exclude` marks the
//! wells of a plate order whose staples are replaced by overhangs.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::path::{Path, PathBuf};

#[macro_use]
extern crate serde_derive;
extern crate serde;

/// Assignment and verification of the overhang bases
mod assigner;
use assigner::{AssignError, AssignmentRun, Strategy};
mod weld_exclusion;
use weld_exclusion::{ExclusionError, ExclusionOptions};

use tilenano_design::{LoadDesignError, TiledDesign};
use tilenano_exports::{ExportError, ExportOptions, ExportSuccess, ExportType};

/// The seed used when the assignment must be reproducible.
const NON_RANDOM_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(name = "tilenano")]
#[command(version, about = "Overhang assignment for tiled DNA origami assemblies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign the bases of the overhangs of a design and export the result
    Assign {
        /// Configuration file of the design
        #[arg(long)]
        config: PathBuf,

        /// Folder in which the results are saved
        #[arg(long, default_value = "results")]
        save_path: PathBuf,

        /// Name of the exported files
        #[arg(long)]
        save_name: Option<String>,

        /// Use a fixed seed for the random bases
        #[arg(long, conflicts_with = "seed")]
        non_random: bool,

        /// Seed for the random bases
        #[arg(long)]
        seed: Option<u64>,

        /// Also export the modified staples
        #[arg(long)]
        modified: bool,

        /// Only export the staples that were extracted, instead of the whole tables
        #[arg(long)]
        added: bool,

        #[arg(long, value_enum, default_value_t = Strategy::Sweep)]
        strategy: Strategy,

        /// Give random bases to the overhangs of edges without neighbouring tile
        #[arg(long)]
        fill_free_edges: bool,
    },

    /// Mark the wells of a plate order that hold staples replaced by overhangs
    Exclude {
        /// Plate order, with columns `Bases`, `Sequence` and `Well Position`
        #[arg(long)]
        order: PathBuf,

        /// Folder containing the csv files of the designs
        #[arg(long)]
        designs: PathBuf,

        /// Configuration file giving the staple colors
        #[arg(long)]
        config: PathBuf,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Also exclude the wells of the modified staples
        #[arg(long)]
        modified: bool,
    },
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), RunError> {
    match command {
        Commands::Assign {
            config,
            save_path,
            save_name,
            non_random,
            seed,
            modified,
            added,
            strategy,
            fill_free_edges,
        } => {
            let seed = if non_random {
                Some(NON_RANDOM_SEED)
            } else {
                seed
            };
            let export_type = if added {
                ExportType::AddedStaples
            } else {
                ExportType::FullTables
            };
            let options = ExportOptions {
                save_path,
                save_name,
                include_modified: modified,
            };
            let success = assign(&config, seed, strategy, fill_free_edges, export_type, &options)?;
            println!("{}", success.message());
        }
        Commands::Exclude {
            order,
            designs,
            config,
            output,
            modified,
        } => {
            let options = ExclusionOptions {
                order,
                designs,
                config,
                output,
                include_modified: modified,
            };
            weld_exclusion::exclude(&options)?;
        }
    }
    Ok(())
}

fn assign(
    config: &Path,
    seed: Option<u64>,
    strategy: Strategy,
    fill_free_edges: bool,
    export_type: ExportType,
    options: &ExportOptions,
) -> Result<ExportSuccess, RunError> {
    let mut design = TiledDesign::from_config_path(config)?;
    let staples = tilenano_design::extract(&design);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = AssignmentRun::new(&design, &staples, rng)
        .fill_free_edges(fill_free_edges)
        .run(strategy)?;
    for (position, edges) in outcome.finished.iter() {
        log::debug!(
            "Tile {}: {} edge group(s) finished, {} with assigned bases",
            position,
            edges.len(),
            outcome.store.get(position).map_or(0, |assigned| assigned.len())
        );
    }
    outcome.commit(&mut design);
    Ok(tilenano_exports::export(
        &design,
        &outcome.staples,
        export_type,
        options,
    )?)
}

#[derive(Debug)]
enum RunError {
    Load(LoadDesignError),
    Assign(AssignError),
    Export(ExportError),
    Exclusion(ExclusionError),
}

impl From<LoadDesignError> for RunError {
    fn from(e: LoadDesignError) -> Self {
        Self::Load(e)
    }
}

impl From<AssignError> for RunError {
    fn from(e: AssignError) -> Self {
        Self::Assign(e)
    }
}

impl From<ExportError> for RunError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl From<ExclusionError> for RunError {
    fn from(e: ExclusionError) -> Self {
        Self::Exclusion(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Could not load design: {}", e),
            Self::Assign(e) => write!(f, "Assignment failed: {}", e),
            Self::Export(e) => write!(f, "Export failed: {}", e),
            Self::Exclusion(e) => write!(f, "Exclusion failed: {}", e),
        }
    }
}
