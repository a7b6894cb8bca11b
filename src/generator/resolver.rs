/*
resolver.rs

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

//! Post-process the spanning tree: dead-end enforcement, then loop
//! augmentation.
//!
//! Both passes are best effort. When the dead-end floor cannot be met within
//! the cell budget, the achieved count is reported rather than raised as an
//! error. Loop augmentation never disconnects the graph (it only ever adds
//! edges between visited cells) and never pushes the dead-end count below a
//! previously met floor.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::generator::graph::{EdgeKind, Grid};
use crate::generator::lattice::{Axial, Direction, Lattice};

/// Constraint resolution passes over a freshly built tree.
pub struct ConstraintResolver<'a> {
    lattice: &'a Lattice,
}

impl<'a> ConstraintResolver<'a> {
    /// Create a resolver for the given lattice.
    pub fn new(lattice: &'a Lattice) -> Self {
        Self { lattice }
    }

    /// Grow single-cell stubs until the dead-end floor is met, the cell
    /// budget is spent, or no growth site remains.
    ///
    /// A stub from a non-leaf cell adds a dead end; a stub from a leaf only
    /// relocates it, but can open mid-chain growth sites for the next round,
    /// so leaves are used as a last resort. Growth stays within the
    /// `target_cells` budget: the dead-end pass backfills a coverage
    /// shortfall, it does not exceed the coverage target.
    ///
    /// Returns the achieved dead-end count.
    pub fn enforce_dead_ends(&self, grid: &mut Grid, target_cells: usize) -> usize {
        let floor: usize = grid.params().min_dead_ends;

        loop {
            let leaves: usize = grid.leaves().len();
            if leaves >= floor {
                return leaves;
            }
            if grid.len() >= target_cells {
                debug!(
                    "dead-end floor not met ({leaves} of {floor}), cell budget spent"
                );
                return leaves;
            }

            // First growth site in lattice order whose stub adds a dead end,
            // falling back to a leaf extension.
            let mut site: Option<(Axial, Axial)> = None;
            let mut fallback: Option<(Axial, Axial)> = None;
            for cell in grid.cells().collect::<Vec<Axial>>() {
                let Some(open) = self
                    .lattice
                    .neighbors_in(cell)
                    .find(|n| !grid.contains(*n))
                else {
                    continue;
                };
                if cell == grid.start() || grid.degree(cell) != 1 {
                    site = Some((cell, open));
                    break;
                }
                if fallback.is_none() {
                    fallback = Some((cell, open));
                }
            }

            match site.or(fallback) {
                Some((cell, stub)) => {
                    debug!("growing dead-end stub {stub} from {cell}");
                    grid.insert_cell(stub);
                    grid.add_edge(cell, stub, EdgeKind::Tree);
                }
                None => {
                    debug!("dead-end floor not met ({leaves} of {floor}), lattice exhausted");
                    return leaves;
                }
            }
        }
    }

    /// Add loop edges between already-visited adjacent cells.
    ///
    /// Candidates are shuffled uniformly; up to
    /// `floor(extra_links × candidates)` become loop edges. A candidate is
    /// skipped when closing it would drop the dead-end count below the floor,
    /// or worsen an already unmet floor.
    ///
    /// Returns `(edges added, candidate count)`.
    pub fn augment_loops(&self, grid: &mut Grid, rng: &mut StdRng) -> (usize, usize) {
        let ratio: f64 = grid.params().extra_links;
        let floor: usize = grid.params().min_dead_ends;

        // Enumerate each unlinked adjacent pair once, through the three
        // "positive" directions.
        let mut candidates: Vec<(Axial, Axial)> = Vec::new();
        for cell in grid.cells().collect::<Vec<Axial>>() {
            for direction in [Direction::E, Direction::Ne, Direction::Nw] {
                let other: Axial = cell.neighbor(direction);
                if grid.contains(other) && !grid.has_edge(cell, other) {
                    candidates.push((cell, other));
                }
            }
        }
        candidates.shuffle(rng);

        let quota: usize = (ratio * candidates.len() as f64).floor() as usize;
        let mut added: usize = 0;

        for (a, b) in candidates.iter().copied() {
            if added >= quota {
                break;
            }

            // Closing a loop onto a dead end eliminates it.
            let current: usize = grid.leaves().len();
            let mut projected: usize = current;
            if grid.degree(a) == 1 && a != grid.start() {
                projected -= 1;
            }
            if grid.degree(b) == 1 && b != grid.start() {
                projected -= 1;
            }
            if projected < floor && projected < current {
                debug!("skipping loop edge {a}-{b}: would drop dead ends to {projected}");
                continue;
            }

            grid.add_edge(a, b, EdgeKind::Loop);
            added += 1;
        }

        debug!(
            "added {added} loop edges out of {} candidates (quota {quota})",
            candidates.len()
        );
        (added, candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;
    use rand::SeedableRng;

    /// A corridor origin - (1,0) - (2,0) on a radius-2 lattice: one dead end.
    fn corridor(params: GenerationParams) -> Grid {
        let mut grid: Grid = Grid::new(params);
        grid.insert_cell(Axial::new(1, 0));
        grid.insert_cell(Axial::new(2, 0));
        grid.add_edge(Axial::ORIGIN, Axial::new(1, 0), EdgeKind::Tree);
        grid.add_edge(Axial::new(1, 0), Axial::new(2, 0), EdgeKind::Tree);
        grid
    }

    #[test]
    fn stub_growth_meets_the_floor_within_budget() {
        let lattice: Lattice = Lattice::new(2).unwrap();
        let params: GenerationParams = GenerationParams {
            radius: 2,
            min_dead_ends: 4,
            ..GenerationParams::default()
        };
        let mut grid: Grid = corridor(params);

        let achieved: usize = ConstraintResolver::new(&lattice).enforce_dead_ends(&mut grid, 10);
        assert!(achieved >= 4, "achieved only {achieved} dead ends");
        assert_eq!(achieved, grid.leaves().len());
        assert!(grid.len() <= 10);
        assert!(grid.is_spanning_tree());
    }

    #[test]
    fn stub_growth_stops_at_the_cell_budget() {
        let lattice: Lattice = Lattice::new(2).unwrap();
        let params: GenerationParams = GenerationParams {
            radius: 2,
            min_dead_ends: 10,
            ..GenerationParams::default()
        };
        let mut grid: Grid = corridor(params);

        let achieved: usize = ConstraintResolver::new(&lattice).enforce_dead_ends(&mut grid, 5);
        assert!(achieved < 10);
        assert_eq!(grid.len(), 5);
        assert!(grid.is_spanning_tree());
    }

    #[test]
    fn met_floor_is_left_untouched() {
        let lattice: Lattice = Lattice::new(2).unwrap();
        let params: GenerationParams = GenerationParams {
            radius: 2,
            min_dead_ends: 2,
            ..GenerationParams::default()
        };
        // Star: two branches off the origin, two dead ends already.
        let mut grid: Grid = Grid::new(params);
        grid.insert_cell(Axial::new(1, 0));
        grid.insert_cell(Axial::new(-1, 0));
        grid.add_edge(Axial::ORIGIN, Axial::new(1, 0), EdgeKind::Tree);
        grid.add_edge(Axial::ORIGIN, Axial::new(-1, 0), EdgeKind::Tree);

        let before: usize = grid.len();
        let achieved: usize = ConstraintResolver::new(&lattice).enforce_dead_ends(&mut grid, 10);
        assert_eq!(achieved, 2);
        assert_eq!(grid.len(), before);
    }

    #[test]
    fn loop_quota_follows_the_ratio() {
        let lattice: Lattice = Lattice::new(1).unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(3);

        // Full radius-1 star: the 6 ring pairs are candidates.
        let params: GenerationParams = GenerationParams {
            radius: 1,
            extra_links: 0.5,
            ..GenerationParams::default()
        };
        let mut grid: Grid = Grid::new(params);
        for n in Axial::ORIGIN.neighbors() {
            grid.insert_cell(n);
            grid.add_edge(Axial::ORIGIN, n, EdgeKind::Tree);
        }

        let (added, candidates) =
            ConstraintResolver::new(&lattice).augment_loops(&mut grid, &mut rng);
        assert_eq!(candidates, 6);
        assert_eq!(added, 3);
        assert_eq!(grid.edge_count(EdgeKind::Loop), 3);
        assert!(grid.is_spanning_tree());
    }

    #[test]
    fn zero_ratio_adds_no_loop() {
        let lattice: Lattice = Lattice::new(1).unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let params: GenerationParams = GenerationParams {
            radius: 1,
            extra_links: 0.0,
            ..GenerationParams::default()
        };
        let mut grid: Grid = Grid::new(params);
        for n in Axial::ORIGIN.neighbors() {
            grid.insert_cell(n);
            grid.add_edge(Axial::ORIGIN, n, EdgeKind::Tree);
        }
        let (added, candidates) =
            ConstraintResolver::new(&lattice).augment_loops(&mut grid, &mut rng);
        assert_eq!((added, candidates), (0, 6));
    }

    #[test]
    fn loops_never_drop_a_met_floor() {
        let lattice: Lattice = Lattice::new(2).unwrap();

        // Two-arm star with min_dead_ends = 2: both arms are dead ends, and
        // the arms are adjacent through ring cells. Whatever the shuffle
        // order, the floor must survive.
        for seed in 0..20 {
            let params: GenerationParams = GenerationParams {
                radius: 2,
                extra_links: 1.0,
                min_dead_ends: 2,
                ..GenerationParams::default()
            };
            let mut grid: Grid = Grid::new(params);
            for n in [Axial::new(1, 0), Axial::new(0, 1), Axial::new(-1, 0)] {
                grid.insert_cell(n);
                grid.add_edge(Axial::ORIGIN, n, EdgeKind::Tree);
            }
            assert_eq!(grid.leaves().len(), 3);

            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            ConstraintResolver::new(&lattice).augment_loops(&mut grid, &mut rng);
            assert!(
                grid.leaves().len() >= 2,
                "seed {seed} dropped the dead-end floor"
            );
            assert!(grid.is_spanning_tree());
        }
    }
}
