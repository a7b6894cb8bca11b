/*
graph.rs

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

//! The generated path graph: visited cells and the edges between them.
//!
//! Tree edges form the spanning structure grown by the builder; loop edges
//! are the additional cycles added by the constraint resolver. A cell pair
//! carries at most one edge. Cells and adjacency lists live in ordered maps
//! so that every traversal of the grid is deterministic.

use log::debug;
use std::collections::{BTreeMap, VecDeque};

use crate::config::GenerationParams;
use crate::generator::lattice::{Axial, Direction};

/// Kind of an edge in the path graph.
///
/// - A `Tree` edge belongs to the spanning tree grown by the builder.
/// - A `Loop` edge is an additional connection between two already-connected
///   cells, creating a cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    Tree,
    Loop,
}

/// Role of a visited cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellRole {
    /// An ordinary path cell.
    Tree,

    /// The cell the player starts from (always the origin).
    Start,

    /// The designated goal cell.
    Goal,
}

/// The generated grid aggregate: visited cells, edges, and parameters.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Parameters this grid was generated with.
    params: GenerationParams,

    /// The start cell.
    start: Axial,

    /// The goal cell, once designated by the assembler.
    goal: Option<Axial>,

    /// For each visited cell, the list of the linked cells with the edge
    /// kind. Both directions of an edge are stored, so the length of a list
    /// is the degree of the cell.
    links: BTreeMap<Axial, Vec<(Axial, EdgeKind)>>,

    /// Whether the grid was rebuilt from a saved level instead of generated.
    /// Restored grids record every edge as a tree edge because the saved form
    /// does not keep the distinction.
    restored: bool,
}

impl Grid {
    /// Create a grid holding only the start cell at the origin.
    pub fn new(params: GenerationParams) -> Self {
        let mut links: BTreeMap<Axial, Vec<(Axial, EdgeKind)>> = BTreeMap::new();
        links.insert(Axial::ORIGIN, Vec::new());
        Self {
            params,
            start: Axial::ORIGIN,
            goal: None,
            links,
            restored: false,
        }
    }

    /// Create an empty grid rebuilt from a saved level.
    pub fn restored(params: GenerationParams) -> Self {
        let mut grid: Grid = Self::new(params);
        grid.restored = true;
        grid
    }

    /// The parameters the grid was generated with. Meaningless defaults for
    /// restored grids.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Whether the grid was rebuilt from a saved level.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// The start cell.
    pub fn start(&self) -> Axial {
        self.start
    }

    /// The goal cell, if designated.
    pub fn goal(&self) -> Option<Axial> {
        self.goal
    }

    /// Designate the goal cell. The cell must be visited.
    pub fn set_goal(&mut self, cell: Axial) {
        debug_assert!(self.contains(cell));
        self.goal = Some(cell);
    }

    /// Role of the given cell, or [`None`] if not visited.
    pub fn role(&self, cell: Axial) -> Option<CellRole> {
        if !self.contains(cell) {
            return None;
        }
        if cell == self.start {
            Some(CellRole::Start)
        } else if self.goal == Some(cell) {
            Some(CellRole::Goal)
        } else {
            Some(CellRole::Tree)
        }
    }

    /// Whether the cell is visited.
    pub fn contains(&self, cell: Axial) -> bool {
        self.links.contains_key(&cell)
    }

    /// Number of visited cells.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// A grid always contains at least the start cell.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The visited cells in ascending coordinate order.
    pub fn cells(&self) -> impl Iterator<Item = Axial> + '_ {
        self.links.keys().copied()
    }

    /// Mark a cell as visited, without any edge yet.
    pub fn insert_cell(&mut self, cell: Axial) {
        self.links.entry(cell).or_default();
    }

    /// Add an edge between two visited cells.
    ///
    /// Returns `false` without touching the grid if the cells are already
    /// linked: a cell pair carries at most one edge.
    pub fn add_edge(&mut self, a: Axial, b: Axial, kind: EdgeKind) -> bool {
        debug_assert!(self.contains(a) && self.contains(b));
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.links.entry(a).or_default().push((b, kind));
        self.links.entry(b).or_default().push((a, kind));
        true
    }

    /// Whether the two cells are linked by an edge of any kind.
    pub fn has_edge(&self, a: Axial, b: Axial) -> bool {
        match self.links.get(&a) {
            Some(l) => l.iter().any(|(c, _)| *c == b),
            None => false,
        }
    }

    /// The cells linked to the given cell, with the edge kinds.
    pub fn linked(&self, cell: Axial) -> &[(Axial, EdgeKind)] {
        match self.links.get(&cell) {
            Some(l) => l,
            None => &[],
        }
    }

    /// Number of incident edges (tree and loop).
    pub fn degree(&self, cell: Axial) -> usize {
        self.linked(cell).len()
    }

    /// Number of incident tree edges.
    pub fn tree_degree(&self, cell: Axial) -> usize {
        self.linked(cell)
            .iter()
            .filter(|(_, k)| *k == EdgeKind::Tree)
            .count()
    }

    /// Every edge once, as `(low, high, kind)` with `low < high`, in
    /// ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (Axial, Axial, EdgeKind)> + '_ {
        self.links.iter().flat_map(|(a, l)| {
            l.iter()
                .filter(move |(b, _)| *a < *b)
                .map(move |(b, k)| (*a, *b, *k))
        })
    }

    /// Number of edges of the given kind.
    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        self.edges().filter(|(_, _, k)| *k == kind).count()
    }

    /// The dead ends: visited cells with exactly one incident edge, the start
    /// cell excluded. Loop edges count, so augmentation can eliminate a leaf.
    pub fn leaves(&self) -> Vec<Axial> {
        self.links
            .iter()
            .filter(|(c, l)| **c != self.start && l.len() == 1)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Breadth-first distance from `from` to every reachable cell, over all
    /// edges. Neighbors are expanded in adjacency-list order.
    pub fn bfs_distances(&self, from: Axial) -> BTreeMap<Axial, u32> {
        let mut distances: BTreeMap<Axial, u32> = BTreeMap::new();
        let mut queue: VecDeque<Axial> = VecDeque::new();

        if self.contains(from) {
            distances.insert(from, 0);
            queue.push_back(from);
        }
        while let Some(cell) = queue.pop_front() {
            let d: u32 = distances[&cell];
            for (next, _) in self.linked(cell) {
                if !distances.contains_key(next) {
                    distances.insert(*next, d + 1);
                    queue.push_back(*next);
                }
            }
        }
        distances
    }

    /// Whether the tree edges alone form a spanning tree over the visited
    /// cells: connected and acyclic.
    pub fn is_spanning_tree(&self) -> bool {
        let tree_edges: usize = self.edge_count(EdgeKind::Tree);
        if tree_edges + 1 != self.len() {
            debug!(
                "not a tree: {} tree edges for {} cells",
                tree_edges,
                self.len()
            );
            return false;
        }

        // With edge count == cells - 1, connectivity implies acyclicity.
        let mut seen: BTreeMap<Axial, ()> = BTreeMap::new();
        let mut queue: VecDeque<Axial> = VecDeque::new();
        seen.insert(self.start, ());
        queue.push_back(self.start);
        while let Some(cell) = queue.pop_front() {
            for (next, kind) in self.linked(cell) {
                if *kind == EdgeKind::Tree && !seen.contains_key(next) {
                    seen.insert(*next, ());
                    queue.push_back(*next);
                }
            }
        }
        seen.len() == self.len()
    }

    /// Connection bitmask of the cell: one bit per hex direction with an
    /// incident edge.
    pub fn connection_mask(&self, cell: Axial) -> u8 {
        let mut mask: u8 = 0;
        for (next, _) in self.linked(cell) {
            if let Some(d) = Direction::between(cell, *next) {
                mask |= d.bit();
            }
        }
        mask
    }
}
