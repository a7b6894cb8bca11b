/*
frontier.rs

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

//! Frontier selection strategies for spanning-tree growth.
//!
//! The frontier holds `(visited cell, unvisited neighbor)` pairs that are
//! eligible for expansion. The three strategies only differ in which pair
//! they hand back next:
//!
//! - [`Strategy::DepthFirst`] pops the most recently added pair, producing
//!   long winding corridors.
//! - [`Strategy::BreadthFirst`] pops the oldest pair, producing short
//!   branches radiating evenly from the start.
//! - [`Strategy::Prim`] draws uniformly at random from the whole frontier,
//!   producing irregular organic branching. It is the only strategy that
//!   consumes the random stream.

use clap::ValueEnum;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use strum_macros::FromRepr;

use crate::generator::lattice::Axial;

/// An expandable `(visited cell, unvisited neighbor)` pair.
pub type Expansion = (Axial, Axial);

/// Frontier selection strategy tag.
///
/// The integer representation matches the values the tuning panel has always
/// used (1 = DFS, 2 = BFS, 3 = Prim's).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Strategy {
    #[default]
    DepthFirst = 1,
    BreadthFirst = 2,
    Prim = 3,
}

impl Strategy {
    /// Create an empty frontier for the strategy.
    pub fn frontier(self) -> Box<dyn SelectionStrategy> {
        match self {
            Strategy::DepthFirst => Box::new(DepthFirstFrontier::default()),
            Strategy::BreadthFirst => Box::new(BreadthFirstFrontier::default()),
            Strategy::Prim => Box::new(PrimFrontier::default()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::DepthFirst => write!(f, "DFS"),
            Strategy::BreadthFirst => write!(f, "BFS"),
            Strategy::Prim => write!(f, "Prim's"),
        }
    }
}

/// Ordering discipline of the expansion frontier.
///
/// `next` pops exactly one pair; it returns [`None`] when the frontier is
/// exhausted. Only [`PrimFrontier`] reads from the random generator.
pub trait SelectionStrategy {
    /// Add an expandable pair.
    fn push(&mut self, pair: Expansion);

    /// Pop the next pair to expand.
    fn next(&mut self, rng: &mut StdRng) -> Option<Expansion>;

    /// Number of pending pairs.
    fn len(&self) -> usize;

    /// Whether no expandable pair remains.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last-in-first-out frontier.
#[derive(Debug, Default)]
pub struct DepthFirstFrontier {
    stack: Vec<Expansion>,
}

impl SelectionStrategy for DepthFirstFrontier {
    fn push(&mut self, pair: Expansion) {
        self.stack.push(pair);
    }

    fn next(&mut self, _rng: &mut StdRng) -> Option<Expansion> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// First-in-first-out frontier.
#[derive(Debug, Default)]
pub struct BreadthFirstFrontier {
    queue: VecDeque<Expansion>,
}

impl SelectionStrategy for BreadthFirstFrontier {
    fn push(&mut self, pair: Expansion) {
        self.queue.push_back(pair);
    }

    fn next(&mut self, _rng: &mut StdRng) -> Option<Expansion> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Unordered frontier with uniform random draws.
#[derive(Debug, Default)]
pub struct PrimFrontier {
    pool: Vec<Expansion>,
}

impl SelectionStrategy for PrimFrontier {
    fn push(&mut self, pair: Expansion) {
        self.pool.push(pair);
    }

    fn next(&mut self, rng: &mut StdRng) -> Option<Expansion> {
        if self.pool.is_empty() {
            return None;
        }
        let i: usize = rng.random_range(0..self.pool.len());
        Some(self.pool.swap_remove(i))
    }

    fn len(&self) -> usize {
        self.pool.len()
    }
}
