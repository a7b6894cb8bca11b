/*
cli_options.rs

Copyright 2026 The Drysland developers

This file is part of Drysland.

Drysland is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Drysland is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Drysland. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the grid generator.
//! The command generates one or more grids from explicit parameters (or from
//! the per-level mapping with `--level`), checks the structural invariants on
//! each of them, and renders the result as ASCII art.
//!
//! # Examples
//!
//! Generate a radius 3 grid with Prim's strategy and render it:
//!
//! ```text
//! $ drysland --radius 3 --strategy prim --extra-links 0.2 --seed 42
//!      .  o  o  .
//!     o  o  o  o  o
//!    .  o  o  o  o  G
//!   .  o  o  S  o  o  .
//!    o  o  o  o  o  o
//!     .  o  o  o  .
//!      .  .  o  .
//! ```
//!
//! Generate 100 grids for level 12 and print statistics:
//!
//! ```text
//! $ drysland --level 12 --count 100 --summary
//! ...
//!        total time = 0.081s
//!      average time = 0.00081s
//!     average cells = 29.4
//! average dead ends = 4.7
//!     average loops = 2.1
//! under-constrained = 0
//! ```

use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::time::Instant;

use crate::blocks::designate_goal;
use crate::config::{COPYRIGHT_NOTICE, GenerationParams, LevelConfig};
use crate::generator::builder::coverage_target;
use crate::generator::frontier::Strategy;
use crate::generator::graph::{CellRole, Grid};
use crate::generator::lattice::{Axial, cell_count};
use crate::generator::{GenerationReport, generate};
use crate::saver::level::LevelState;

/// Generate and inspect Drysland grids for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Take the parameters from the per-level mapping (zero-based index)
    #[arg(short, long)]
    level: Option<u32>,

    /// Lattice radius, 1 to 10
    #[arg(short, long)]
    radius: Option<i32>,

    /// Fraction of the lattice to visit, in (0, 1]
    #[arg(short = 'o', long)]
    coverage: Option<f64>,

    /// Frontier selection strategy
    #[arg(value_enum, short = 'f', long)]
    strategy: Option<Strategy>,

    /// Fraction of the loop candidates to add, in [0, 1]
    #[arg(short = 'x', long)]
    extra_links: Option<f64>,

    /// Minimum number of dead ends, at least 2
    #[arg(short, long)]
    min_dead_ends: Option<usize>,

    /// Skip block materialization, keep only the graph
    #[arg(long, default_value_t = false)]
    links_only: bool,

    /// Number of grids to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random number generator
    #[arg(short = 'e', long)]
    seed: Option<u64>,

    /// Print some statistics after generating the grids
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Combine the per-level mapping with the explicit overrides.
    fn params(&self) -> GenerationParams {
        let mut params: GenerationParams = match self.level {
            Some(level) => LevelConfig::new().generate_level(level),
            None => GenerationParams::default(),
        };
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(coverage) = self.coverage {
            params.coverage = coverage;
        }
        if let Some(strategy) = self.strategy {
            params.strategy = strategy;
        }
        if let Some(extra_links) = self.extra_links {
            params.extra_links = extra_links;
        }
        if let Some(min_dead_ends) = self.min_dead_ends {
            params.min_dead_ends = min_dead_ends;
        }
        params.links_only = self.links_only;
        params
    }
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let params: GenerationParams = args.params();
    if let Err(error) = params.validate() {
        eprintln!("{error}");
        return 1;
    }

    let seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    debug!("Seed: {seed}");

    let mut total_cells: usize = 0;
    let mut total_dead_ends: usize = 0;
    let mut total_loops: usize = 0;
    let mut under_constrained: usize = 0;
    let start: Instant = Instant::now();

    for i in 0..args.count {
        debug!("Iteration {i}");

        let (mut grid, report) = match generate(&params, &mut rng) {
            Ok(result) => result,
            Err(error) => {
                eprintln!("{error}");
                return 1;
            }
        };
        designate_goal(&mut grid);

        verify(&grid, &report, &params);

        total_cells += report.visited_cells;
        total_dead_ends += report.dead_ends;
        total_loops += report.loop_edges;
        if report.is_under_constrained() {
            under_constrained += 1;
        }

        if args.count == 1 {
            println!("{}", render(&grid));
        }
    }

    // Print some stats
    if args.summary {
        let total: f64 = start.elapsed().as_secs_f64();
        println!(
            "
       total time = {}s
     average time = {}s
    average cells = {}
average dead ends = {}
    average loops = {}
under-constrained = {}",
            total,
            total / args.count as f64,
            total_cells as f64 / args.count as f64,
            total_dead_ends as f64 / args.count as f64,
            total_loops as f64 / args.count as f64,
            under_constrained
        );
    }
    0
}

/// Check the structural invariants of a generated grid.
///
/// A violation here is a generator bug, not a user mistake.
fn verify(grid: &Grid, report: &GenerationReport, params: &GenerationParams) {
    // The tree edges alone must connect every visited cell
    if !grid.is_spanning_tree() {
        eprintln!("Disconnected grid: {:?}", grid.cells().collect::<Vec<Axial>>());
        panic!("Bug: the tree edges do not span the visited cells");
    }

    // The visited count must match the coverage target exactly
    let target: usize = coverage_target(params.coverage, cell_count(params.radius));
    if grid.len() != target {
        eprintln!("Wrong size: {} instead of {}", grid.len(), target);
        panic!("Bug: wrong number of visited cells");
    }

    // The dead-end floor must hold unless the run is reported short
    if !report.is_under_constrained() && grid.leaves().len() < params.min_dead_ends {
        eprintln!(
            "Dead ends: {} instead of at least {}",
            grid.leaves().len(),
            params.min_dead_ends
        );
        panic!("Bug: the dead-end floor was silently missed");
    }

    // The snapshot codec must reproduce the grid exactly
    let state: LevelState = LevelState::capture(0, grid, None);
    match state.reconstruct() {
        Ok(restored) => {
            let original: Vec<Axial> = grid.cells().collect();
            let rebuilt: Vec<Axial> = restored.cells().collect();
            if original != rebuilt {
                eprintln!("Cells: {original:?} became {rebuilt:?}");
                panic!("Bug: the snapshot codec lost cells");
            }
        }
        Err(error) => {
            eprintln!("{error}");
            panic!("Bug: a generated grid failed snapshot validation");
        }
    }
}

/// Render the grid as ASCII art, one lattice row per line.
///
/// Visited cells show as `o`, the start as `S`, the goal as `G`, and
/// unvisited in-radius cells as `.`.
fn render(grid: &Grid) -> String {
    let radius: i32 = grid.params().radius;
    let mut out: String = String::new();
    for r in -radius..=radius {
        // Shift each row to line the hexes up
        for _ in 0..(r + radius) {
            out.push(' ');
        }
        for q in -radius..=radius {
            let coord: Axial = Axial::new(q, r);
            if coord.distance() > radius {
                out.push_str("   ");
                continue;
            }
            let glyph: char = match grid.role(coord) {
                Some(CellRole::Start) => 'S',
                Some(CellRole::Goal) => 'G',
                Some(CellRole::Tree) => 'o',
                None => '.',
            };
            out.push(' ');
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_a_generated_grid() {
        let params: GenerationParams = GenerationParams {
            radius: 3,
            coverage: 0.9,
            strategy: Strategy::DepthFirst,
            extra_links: 0.2,
            min_dead_ends: 2,
            links_only: false,
        };
        let mut rng: StdRng = StdRng::seed_from_u64(17);
        let (grid, report) = generate(&params, &mut rng).unwrap();
        verify(&grid, &report, &params);
    }

    #[test]
    fn render_marks_the_start_and_goal() {
        let params: GenerationParams = GenerationParams {
            radius: 2,
            coverage: 1.0,
            strategy: Strategy::BreadthFirst,
            extra_links: 0.0,
            min_dead_ends: 2,
            links_only: false,
        };
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let (mut grid, _) = generate(&params, &mut rng).unwrap();
        designate_goal(&mut grid);
        let art: String = render(&grid);
        assert_eq!(art.matches('S').count(), 1);
        assert_eq!(art.matches('G').count(), 1);
        assert_eq!(art.lines().count(), 5);
    }
}
