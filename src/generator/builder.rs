/*
builder.rs

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

//! Grow a spanning tree over the lattice with a frontier strategy.

use log::debug;
use rand::rngs::StdRng;

use crate::config::GenerationParams;
use crate::errors::GridError;
use crate::generator::frontier::SelectionStrategy;
use crate::generator::graph::{EdgeKind, Grid};
use crate::generator::lattice::{Axial, Lattice};

/// Number of cells to visit for the given coverage fraction, clamped to at
/// least the start cell and at most the whole lattice.
pub fn coverage_target(coverage: f64, lattice_cells: usize) -> usize {
    ((coverage * lattice_cells as f64).round() as usize).clamp(1, lattice_cells)
}

/// Spanning-tree builder over a bounded lattice.
pub struct GraphBuilder<'a> {
    lattice: &'a Lattice,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder for the given lattice.
    pub fn new(lattice: &'a Lattice) -> Self {
        Self { lattice }
    }

    /// Grow a spanning tree from the origin until the coverage target is
    /// reached or the frontier is exhausted.
    ///
    /// Coverage is a target, not a guarantee: if the frontier runs dry first,
    /// the smaller connected result is accepted and the shortfall shows up in
    /// the generation report.
    ///
    /// # Errors
    ///
    /// Invalid parameters are rejected before any cell is visited; no partial
    /// grid is ever returned.
    pub fn build(
        &self,
        params: &GenerationParams,
        rng: &mut StdRng,
    ) -> Result<Grid, GridError> {
        params.validate()?;

        let target: usize = coverage_target(params.coverage, self.lattice.len());
        let mut grid: Grid = Grid::new(params.clone());
        let mut frontier: Box<dyn SelectionStrategy> = params.strategy.frontier();

        for neighbor in self.lattice.neighbors_in(Axial::ORIGIN) {
            frontier.push((Axial::ORIGIN, neighbor));
        }

        while grid.len() < target {
            let Some((from, to)) = frontier.next(rng) else {
                debug!(
                    "frontier exhausted at {} of {} cells",
                    grid.len(),
                    target
                );
                break;
            };

            // The neighbor may have been claimed through another pair since
            // this one was enqueued.
            if grid.contains(to) {
                continue;
            }

            grid.insert_cell(to);
            grid.add_edge(from, to, EdgeKind::Tree);
            for next in self.lattice.neighbors_in(to) {
                if !grid.contains(next) {
                    frontier.push((to, next));
                }
            }
        }

        debug!(
            "built {} of {} cells with {} ({} pending pairs)",
            grid.len(),
            target,
            params.strategy,
            frontier.len()
        );
        Ok(grid)
    }
}
