/*
config.rs

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

//! Generation parameters and the per-level configuration mapping.
//!
//! [`GenerationParams`] is the single candidate-configuration struct that
//! every surface (level progression, developer CLI, tests) submits to the
//! engine. The engine validates it with [`GenerationParams::validate`] before
//! any graph mutation and applies it atomically; no internal field is mutated
//! in place from the outside.

use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use crate::generator::frontier::Strategy;

/// Notice printed by the `--version` command-line option.
pub const COPYRIGHT_NOTICE: &str = concat!(
    "drysland ",
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2026 The Drysland developers\n\
     License GPL-3.0-or-later <https://gnu.org/licenses/gpl.html>"
);

/// Largest radius the engine accepts. The lattice stays small enough
/// (331 cells) for generation to complete within one frame tick.
pub const MAX_RADIUS: i32 = 10;

/// Parameters driving one grid generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Lattice radius, 1 to [`MAX_RADIUS`].
    pub radius: i32,

    /// Target fraction of in-radius cells to visit, in `(0, 1]`.
    pub coverage: f64,

    /// Frontier selection strategy.
    pub strategy: Strategy,

    /// Fraction of the loop-edge candidates to add, in `[0, 1]`.
    pub extra_links: f64,

    /// Minimum number of dead ends (best effort).
    pub min_dead_ends: usize,

    /// Skip Block materialization; keep only the graph.
    pub links_only: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            radius: 1,
            coverage: 0.5,
            strategy: Strategy::default(),
            extra_links: 0.0,
            min_dead_ends: 2,
            links_only: false,
        }
    }
}

impl GenerationParams {
    /// Check every parameter range.
    ///
    /// # Errors
    ///
    /// Returns the first [`GridError::Configuration`] found. Callers must not
    /// build any grid state from parameters that fail this check.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.radius < 1 {
            return Err(GridError::configuration(
                "radius",
                self.radius,
                "must be at least 1",
            ));
        }
        if self.radius > MAX_RADIUS {
            return Err(GridError::configuration(
                "radius",
                self.radius,
                "must be at most 10",
            ));
        }
        if self.coverage <= 0.0 || self.coverage > 1.0 || !self.coverage.is_finite() {
            return Err(GridError::configuration(
                "coverage",
                self.coverage,
                "must be within (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.extra_links) || !self.extra_links.is_finite() {
            return Err(GridError::configuration(
                "extra_links",
                self.extra_links,
                "must be within [0, 1]",
            ));
        }
        if self.min_dead_ends < 2 {
            return Err(GridError::configuration(
                "min_dead_ends",
                self.min_dead_ends,
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Deterministic mapping from a level index to generation parameters.
///
/// The progression grows the playing field every few levels, rotates through
/// the three strategies so that consecutive levels feel different, and
/// ramps the loop-edge ratio and the dead-end floor slowly.
#[derive(Debug, Clone, Default)]
pub struct LevelConfig;

impl LevelConfig {
    /// Create the level configuration.
    pub fn new() -> Self {
        Self
    }

    /// Parameters for the given zero-based level index.
    ///
    /// The mapping is pure: the same index always yields the same parameters,
    /// and every result passes [`GenerationParams::validate`].
    pub fn generate_level(&self, level_index: u32) -> GenerationParams {
        let radius: i32 = (1 + (level_index / 3) as i32).min(MAX_RADIUS);
        let coverage: f64 = 0.5 + 0.1 * f64::from(level_index % 3);
        let strategy: Strategy = match level_index % 3 {
            0 => Strategy::BreadthFirst,
            1 => Strategy::DepthFirst,
            _ => Strategy::Prim,
        };
        let extra_links: f64 = 0.05 * f64::from(level_index % 5);
        let min_dead_ends: usize = (2 + (level_index / 5) as usize).min(10);

        let params: GenerationParams = GenerationParams {
            radius,
            coverage,
            strategy,
            extra_links,
            min_dead_ends,
            links_only: false,
        };
        debug_assert!(params.validate().is_ok());
        params
    }
}
