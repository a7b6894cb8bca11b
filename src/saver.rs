/*
saver.rs

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

//! Save and restore the level in progress.
//!
//! The saved form is a [`level::LevelState`]: the level number, a timestamp,
//! and for each block its coordinate, connection bitmask, and open flag.
//! That is enough to rebuild the graph exactly without re-running
//! generation; the generation parameters are deliberately not stored.
//!
//! The state is written to the `savelevel.json` file in JSON format by using
//! [`serde`].

pub mod level;
