/*
blocks.rs

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

//! Materialize a generated grid into interactive blocks.
//!
//! Each visited cell becomes one [`Block`] carrying a 6-bit connection mask,
//! an open flag, and transient pointer state. The block grid tracks the
//! player's active frontier: a click advances it along a connection, and
//! reaching the goal emits [`GridEvent::LevelComplete`].
//!
//! With `links_only` no block is materialized at all; the underlying graph
//! stays available for connectivity queries, which is what structural
//! validation runs use.

use log::debug;
use std::collections::BTreeMap;

use crate::events::{EventSender, GridEvent};
use crate::generator::graph::Grid;
use crate::generator::lattice::{Axial, Direction};

/// One interactive path cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Lattice coordinate of the block.
    pub coord: Axial,

    /// Connection bitmask, one bit per hex direction with an edge.
    pub links: u8,

    /// Whether the block can be entered.
    pub open: bool,

    /// Whether the pointer is over the block.
    pub hovered: bool,

    /// Whether the block casts shadows.
    pub shadows: bool,
}

/// Designate the goal: the dead end farthest from the start, ties broken by
/// the lowest lattice index. Falls back to the farthest cell when the grid
/// has no dead end at all (a single-cell or fully looped grid).
pub fn designate_goal(grid: &mut Grid) -> Axial {
    let distances: BTreeMap<Axial, u32> = grid.bfs_distances(grid.start());

    let farthest = |cells: &mut dyn Iterator<Item = Axial>| -> Option<Axial> {
        let mut best: Option<(u32, Axial)> = None;
        // Cells come in ascending order, so the first maximum wins ties.
        for cell in cells {
            let d: u32 = distances[&cell];
            if best.is_none_or(|(bd, _)| d > bd) {
                best = Some((d, cell));
            }
        }
        best.map(|(_, c)| c)
    };

    let goal: Axial = farthest(&mut grid.leaves().into_iter())
        .or_else(|| farthest(&mut grid.cells().collect::<Vec<Axial>>().into_iter()))
        .unwrap_or(grid.start());
    grid.set_goal(goal);
    goal
}

/// The live interactive projection of a generated grid.
#[derive(Debug)]
pub struct BlockGrid {
    /// Blocks by coordinate. Empty for a links-only grid.
    blocks: BTreeMap<Axial, Block>,

    level: u32,
    start: Axial,
    goal: Axial,

    /// The block the player advanced to last.
    active: Axial,

    events: EventSender,
    disposed: bool,
}

impl BlockGrid {
    /// Materialize the grid. Designates the goal on the grid, then creates
    /// one block per visited cell, unless the grid was generated links-only.
    pub fn assemble(grid: &mut Grid, level: u32, events: EventSender) -> Self {
        let start: Axial = grid.start();
        let goal: Axial = designate_goal(grid);

        let mut blocks: BTreeMap<Axial, Block> = BTreeMap::new();
        if !grid.params().links_only {
            for coord in grid.cells().collect::<Vec<Axial>>() {
                blocks.insert(
                    coord,
                    Block {
                        coord,
                        links: grid.connection_mask(coord),
                        open: true,
                        hovered: false,
                        shadows: true,
                    },
                );
            }
        }
        debug!(
            "assembled {} blocks for level {level} (start {start}, goal {goal})",
            blocks.len()
        );

        Self {
            blocks,
            level,
            start,
            goal,
            active: start,
            events,
            disposed: false,
        }
    }

    /// The level the grid belongs to.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The start block coordinate.
    pub fn start(&self) -> Axial {
        self.start
    }

    /// The goal block coordinate.
    pub fn goal(&self) -> Axial {
        self.goal
    }

    /// The currently active frontier block.
    pub fn active(&self) -> Axial {
        self.active
    }

    /// The materialized blocks, in ascending coordinate order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of materialized blocks. Zero for a links-only grid.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block was materialized.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block at the given coordinate.
    pub fn block(&self, coord: Axial) -> Option<&Block> {
        self.blocks.get(&coord)
    }

    /// Set the open flag of a block. Used when restoring a saved level.
    pub fn set_open(&mut self, coord: Axial, open: bool) {
        if let Some(b) = self.blocks.get_mut(&coord) {
            b.open = open;
        }
    }

    /// Advance the active frontier to the clicked block.
    ///
    /// The click is valid only when the block is open and linked to the
    /// active block by a connection bit. Reaching the goal emits
    /// [`GridEvent::LevelComplete`] for the game-flow collaborator.
    ///
    /// Returns whether the click was accepted.
    pub fn on_click(&mut self, coord: Axial) -> bool {
        if self.disposed {
            return false;
        }
        let Some(block) = self.blocks.get(&coord) else {
            return false;
        };
        if !block.open {
            debug!("click on closed block {coord} ignored");
            return false;
        }
        let Some(direction) = Direction::between(self.active, coord) else {
            return false;
        };
        let active_links: u8 = self
            .blocks
            .get(&self.active)
            .map(|b| b.links)
            .unwrap_or(0);
        if active_links & direction.bit() == 0 {
            debug!("click on unconnected block {coord} ignored");
            return false;
        }

        self.active = coord;
        self.events.send(GridEvent::FrontierAdvanced { coord });
        if coord == self.goal {
            self.events.send(GridEvent::LevelComplete { level: self.level });
        }
        true
    }

    /// Update the hovered flag: exactly the intersected blocks are hovered.
    /// The intersections come from the external pointer collaborator.
    pub fn hover_set(&mut self, hits: &[Axial]) {
        if self.disposed {
            return;
        }
        for (coord, block) in self.blocks.iter_mut() {
            block.hovered = hits.contains(coord);
        }
    }

    /// Toggle the shadow flag on every block. Pure rendering pass-through.
    pub fn set_shadows(&mut self, enabled: bool) {
        for block in self.blocks.values_mut() {
            block.shadows = enabled;
        }
    }

    /// Release every block and detach the interaction surface.
    ///
    /// Safe to call more than once; calls after the first are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!("disposing {} blocks of level {}", self.blocks.len(), self.level);
        self.blocks.clear();
        self.disposed = true;
    }

    /// Whether the grid has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;
    use crate::events::EventQueue;
    use crate::generator::frontier::Strategy;
    use crate::generator::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn radius_one_star() -> (Grid, EventQueue) {
        let params: GenerationParams = GenerationParams {
            radius: 1,
            coverage: 1.0,
            strategy: Strategy::BreadthFirst,
            ..GenerationParams::default()
        };
        let (grid, _) = generate(&params, &mut StdRng::seed_from_u64(0)).unwrap();
        (grid, EventQueue::new())
    }

    #[test]
    fn assemble_creates_one_block_per_cell() {
        let (mut grid, queue) = radius_one_star();
        let blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        assert_eq!(blocks.len(), 7);
        assert_eq!(blocks.start(), Axial::ORIGIN);
        assert_eq!(blocks.active(), Axial::ORIGIN);
        // Every outer block connects back to the origin.
        for block in blocks.blocks().filter(|b| b.coord != Axial::ORIGIN) {
            let back: Direction = Direction::between(block.coord, Axial::ORIGIN).unwrap();
            assert_ne!(block.links & back.bit(), 0);
        }
    }

    #[test]
    fn goal_is_the_farthest_dead_end_with_lowest_tie_break() {
        let (mut grid, queue) = radius_one_star();
        let blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        // All six ring cells are distance-1 dead ends; the lowest coordinate
        // in enumeration order wins.
        assert_eq!(blocks.goal(), Axial::new(-1, 0));
        assert_eq!(grid.goal(), Some(Axial::new(-1, 0)));
    }

    #[test]
    fn click_advances_only_along_connections() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());

        // Not adjacent to the active (origin) block's position? (1,0) is.
        assert!(blocks.on_click(Axial::new(1, 0)));
        assert_eq!(blocks.active(), Axial::new(1, 0));

        // Ring cells hold no edge between each other in a star.
        assert!(!blocks.on_click(Axial::new(0, 1)));
        assert_eq!(blocks.active(), Axial::new(1, 0));

        // Unknown coordinate.
        assert!(!blocks.on_click(Axial::new(5, 5)));
    }

    #[test]
    fn closed_blocks_reject_clicks() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        blocks.set_open(Axial::new(1, 0), false);
        assert!(!blocks.on_click(Axial::new(1, 0)));
    }

    #[test]
    fn reaching_the_goal_signals_level_completion() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 4, queue.sender());
        let goal: Axial = blocks.goal();
        assert!(blocks.on_click(goal));

        let events = queue.drain();
        assert!(events.contains(&GridEvent::FrontierAdvanced { coord: goal }));
        assert!(events.contains(&GridEvent::LevelComplete { level: 4 }));
    }

    #[test]
    fn hover_marks_exactly_the_intersected_blocks() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        blocks.hover_set(&[Axial::new(1, 0)]);
        assert!(blocks.block(Axial::new(1, 0)).unwrap().hovered);
        assert!(!blocks.block(Axial::ORIGIN).unwrap().hovered);

        blocks.hover_set(&[]);
        assert!(blocks.blocks().all(|b| !b.hovered));
    }

    #[test]
    fn shadows_are_a_pass_through_flag() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        blocks.set_shadows(false);
        assert!(blocks.blocks().all(|b| !b.shadows));
        blocks.set_shadows(true);
        assert!(blocks.blocks().all(|b| b.shadows));
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut grid, queue) = radius_one_star();
        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        blocks.dispose();
        assert!(blocks.is_disposed());
        assert_eq!(blocks.len(), 0);
        blocks.dispose();
        assert!(!blocks.on_click(Axial::new(1, 0)));
    }

    #[test]
    fn links_only_materializes_no_block() {
        let params: GenerationParams = GenerationParams {
            radius: 2,
            coverage: 0.8,
            links_only: true,
            ..GenerationParams::default()
        };
        let (mut grid, _) = generate(&params, &mut StdRng::seed_from_u64(9)).unwrap();
        let queue: EventQueue = EventQueue::new();
        let blocks: BlockGrid = BlockGrid::assemble(&mut grid, 1, queue.sender());
        assert!(blocks.is_empty());
        // The graph itself stays queryable.
        assert!(grid.goal().is_some());
        assert!(grid.len() > 1);
    }
}
