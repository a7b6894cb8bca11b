/*
level.rs

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

//! Serialized level snapshots and the save file around them.
//!
//! [`LevelState::capture`] reduces a live grid to coordinates, connection
//! bitmasks, and open flags. [`LevelState::reconstruct`] rebuilds a
//! [`Grid`] from those bitmasks alone, bypassing the generator entirely.
//! Reconstruction validates the snapshot first and fails fast on any
//! inconsistency rather than producing a broken graph.

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::blocks::BlockGrid;
use crate::config::{GenerationParams, MAX_RADIUS};
use crate::errors::GridError;
use crate::generator::graph::{EdgeKind, Grid};
use crate::generator::lattice::{Axial, Direction};

/// Saved form of one block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlockState {
    pub q: i32,
    pub r: i32,

    /// Connection bitmask, one bit per hex direction.
    pub links: u8,

    /// Whether the block can be entered.
    pub open: bool,
}

/// Persisted snapshot of a level in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    /// The level number.
    pub level: u32,

    /// Unix timestamp of the save.
    pub timestamp: i64,

    /// One entry per visited cell.
    pub blocks: Vec<BlockState>,
}

impl LevelState {
    /// Snapshot the given grid.
    ///
    /// Open flags come from the materialized blocks; for a links-only grid
    /// every cell is recorded open.
    pub fn capture(level: u32, grid: &Grid, blocks: Option<&BlockGrid>) -> Self {
        let blocks: Vec<BlockState> = grid
            .cells()
            .map(|coord| BlockState {
                q: coord.q,
                r: coord.r,
                links: grid.connection_mask(coord),
                open: blocks
                    .and_then(|b| b.block(coord))
                    .map(|b| b.open)
                    .unwrap_or(true),
            })
            .collect();
        Self {
            level,
            timestamp: Utc::now().timestamp(),
            blocks,
        }
    }

    /// Rebuild a grid from the snapshot, without re-running generation.
    ///
    /// Every connection bit implies a reciprocal edge to the neighbor in
    /// that direction. The saved form does not keep the tree/loop
    /// distinction, so every rebuilt edge is recorded as a tree edge and the
    /// grid is marked restored.
    ///
    /// # Errors
    ///
    /// [`GridError::SerializationMismatch`] when a coordinate falls outside
    /// the representable lattice bounds, a coordinate is duplicated, the
    /// start cell is missing, a bitmask implies an edge its neighbor does
    /// not mirror, or a block is not connected to the start cell.
    pub fn reconstruct(&self) -> Result<Grid, GridError> {
        let mut masks: BTreeMap<Axial, u8> = BTreeMap::new();
        let mut open_radius: i32 = 1;
        for state in &self.blocks {
            let coord: Axial = Axial::new(state.q, state.r);
            if coord.distance() > MAX_RADIUS {
                return Err(GridError::mismatch(format!(
                    "block {coord} is outside the lattice bounds"
                )));
            }
            if masks.insert(coord, state.links).is_some() {
                return Err(GridError::mismatch(format!("block {coord} is duplicated")));
            }
            open_radius = open_radius.max(coord.distance());
        }
        if !masks.contains_key(&Axial::ORIGIN) {
            return Err(GridError::mismatch("the start cell is missing"));
        }

        // The parameters are not recoverable from the snapshot; record the
        // observed radius and defaults for the rest.
        let params: GenerationParams = GenerationParams {
            radius: open_radius,
            ..GenerationParams::default()
        };
        let mut grid: Grid = Grid::restored(params);

        for coord in masks.keys() {
            grid.insert_cell(*coord);
        }
        for (coord, mask) in &masks {
            for direction in Direction::ALL {
                if mask & direction.bit() == 0 {
                    continue;
                }
                let neighbor: Axial = coord.neighbor(direction);
                let mirrored: bool = masks
                    .get(&neighbor)
                    .is_some_and(|m| m & direction.opposite().bit() != 0);
                if !mirrored {
                    return Err(GridError::mismatch(format!(
                        "edge {coord}-{neighbor} is not reciprocal"
                    )));
                }
                grid.add_edge(*coord, neighbor, EdgeKind::Tree);
            }
        }

        // Reciprocal bitmasks can still describe an island with no path to
        // the start cell.
        if grid.bfs_distances(Axial::ORIGIN).len() != grid.len() {
            return Err(GridError::mismatch(
                "some blocks are not connected to the start cell",
            ));
        }

        debug!(
            "reconstructed level {}: {} cells, {} edges",
            self.level,
            grid.len(),
            grid.edges().count()
        );
        Ok(grid)
    }
}

/// Save and restore the [`LevelState`] on disk.
pub struct SaverLevel {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverLevel {
    /// Create a [`SaverLevel`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the level
    /// must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savelevel.json");
        debug!("Save level file: {data_dir:?}");
        SaverLevel {
            save_file: data_dir,
        }
    }

    /// Retrieve the saved [`LevelState`].
    ///
    /// Return the [`LevelState`] object or None if there is no saved level.
    pub fn get_state(&self) -> Result<Option<LevelState>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let state: LevelState = serde_json::from_reader(reader)?;
        Ok(Some(state))
    }

    /// Save the provided [`LevelState`] object.
    pub fn save_state(&self, state: &LevelState) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, state)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved level.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
