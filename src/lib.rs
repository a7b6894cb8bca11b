/*
lib.rs

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

//! Deterministic grid generation for the Drysland hex puzzle.
//!
//! The engine grows a connected path network over a bounded hexagonal
//! lattice. A [`config::GenerationParams`] value selects the lattice radius,
//! the coverage fraction, the frontier strategy, the loop-edge ratio, and the
//! dead-end floor; [`generator::generate`] turns it into a
//! [`generator::graph::Grid`] plus a report of any best-effort shortfall.
//! All randomness flows through a caller-provided seeded generator, so the
//! same seed and parameters always produce the same grid.
//!
//! On top of the generator, [`blocks`] materializes the interactive blocks
//! and the goal, [`saver`] snapshots a level in progress to disk, and
//! [`session::Session`] ties level progression, persistence, and events
//! together for the game front end. [`cli_options`] is the developer surface
//! for tuning the generator from the command line.

pub mod blocks;
pub mod cli_options;
pub mod config;
pub mod errors;
pub mod events;
pub mod generator;
pub mod saver;
pub mod session;
