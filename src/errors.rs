/*
errors.rs

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

//! Error types for the grid engine.
//!
//! Configuration errors are raised before any graph mutation, so a failed
//! call never leaves a partial grid behind. Serialization mismatches abort
//! loading a saved level; the session then falls back to fresh generation.
//!
//! Coverage or dead-end shortfalls are not errors. They are reported through
//! [`crate::generator::GenerationReport`].

use thiserror::Error;

/// Type of errors raised by the grid engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// An invalid generation parameter, rejected before any grid is built.
    #[error("invalid {field} ({value}): {reason}")]
    Configuration {
        /// Name of the rejected parameter.
        field: &'static str,

        /// The value that was provided.
        value: String,

        /// Why the value is not acceptable.
        reason: &'static str,
    },

    /// A saved level that cannot be turned back into a consistent graph.
    #[error("cannot restore the saved level: {reason}")]
    SerializationMismatch {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl GridError {
    /// Build a configuration error for the given parameter.
    pub fn configuration(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Build a serialization mismatch error.
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::SerializationMismatch {
            reason: reason.into(),
        }
    }
}
