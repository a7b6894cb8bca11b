/*
session.rs

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

//! The game session: level progression, generation, save and restore.
//!
//! The session is the one context object binding the level configuration,
//! the saver, the event queue, and the live grid. It is constructed once at
//! startup and passed by reference to whatever needs it; there is no global
//! lookup. At most one grid is live at a time: the previous grid is disposed
//! before its replacement exists.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::PathBuf;

use crate::blocks::BlockGrid;
use crate::config::{GenerationParams, LevelConfig};
use crate::errors::GridError;
use crate::events::{EventQueue, GridEvent};
use crate::generator::graph::Grid;
use crate::generator::lattice::Axial;
use crate::generator::{GenerationReport, generate};
use crate::saver::level::{LevelState, SaverLevel};

/// One game session owning the live grid.
pub struct Session {
    config: LevelConfig,
    saver: SaverLevel,
    events: EventQueue,
    rng: StdRng,

    /// Current level; 0 before the first level starts.
    level: u32,

    grid: Option<Grid>,
    blocks: Option<BlockGrid>,
    report: Option<GenerationReport>,

    /// Candidate parameters submitted by the tuning surface; used instead of
    /// the per-level mapping once validated.
    override_params: Option<GenerationParams>,

    /// Whether the saved level was already consumed. The save file is only
    /// tried once per session, like the original resume behavior.
    loaded: bool,
}

impl Session {
    /// Create a session. The data directory is where the level in progress
    /// is saved.
    pub fn new(data_dir: PathBuf, seed: u64) -> Self {
        Self {
            config: LevelConfig::new(),
            saver: SaverLevel::new(data_dir),
            events: EventQueue::new(),
            rng: StdRng::seed_from_u64(seed),
            level: 0,
            grid: None,
            blocks: None,
            report: None,
            override_params: None,
            loaded: false,
        }
    }

    /// The current level, 0 before the first level starts.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The live graph, if a level is active.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The interactive blocks of the live grid.
    pub fn blocks(&self) -> Option<&BlockGrid> {
        self.blocks.as_ref()
    }

    /// Mutable access to the interactive blocks, for the pointer and click
    /// collaborators.
    pub fn blocks_mut(&mut self) -> Option<&mut BlockGrid> {
        self.blocks.as_mut()
    }

    /// Report of the last generation run. [`None`] for a restored level.
    pub fn report(&self) -> Option<&GenerationReport> {
        self.report.as_ref()
    }

    /// Submit candidate generation parameters from the tuning surface.
    ///
    /// The candidate is validated as a whole and applied atomically: either
    /// every field is accepted and used for the next levels, or nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// The first invalid field, as a [`GridError::Configuration`].
    pub fn apply_params(&mut self, candidate: GenerationParams) -> Result<(), GridError> {
        candidate.validate()?;
        debug!("tuning parameters applied: {candidate:?}");
        self.override_params = Some(candidate);
        Ok(())
    }

    /// Move to the next level.
    ///
    /// The first call prefers the saved level, if any: the snapshot is
    /// reconstructed without re-running generation. A snapshot that fails
    /// validation is discarded with a warning, and the level is generated
    /// fresh from the configuration instead.
    ///
    /// # Errors
    ///
    /// Only configuration errors from generation; a broken save file is not
    /// an error.
    pub fn next_level(&mut self) -> Result<(), GridError> {
        if let Some(state) = self.take_saved_state() {
            match state.reconstruct() {
                Ok(grid) => {
                    self.level = state.level;
                    self.report = None;
                    self.install(grid, Some(&state));
                    info!("resumed level {} from the saved state", self.level);
                    return Ok(());
                }
                Err(e) => {
                    warn!("discarding the saved level: {e}");
                    self.saver.delete_save();
                }
            }
        }

        self.level += 1;
        let params: GenerationParams = match &self.override_params {
            Some(p) => p.clone(),
            None => self.config.generate_level(self.level - 1),
        };
        debug!("level {}: {params:?}", self.level);

        let (grid, report) = generate(&params, &mut self.rng)?;
        self.report = Some(report);
        self.install(grid, None);
        Ok(())
    }

    /// Save the level in progress. Does nothing before the first level.
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let Some(grid) = self.grid.as_ref() else {
            return Ok(());
        };
        if self.level == 0 {
            return Ok(());
        }
        let state: LevelState = LevelState::capture(self.level, grid, self.blocks.as_ref());
        self.saver.save_state(&state)
    }

    /// Drain the events of the current tick for the game-flow collaborator.
    pub fn update(&mut self) -> Vec<GridEvent> {
        let events: Vec<GridEvent> = self.events.drain();
        for event in &events {
            if let GridEvent::LevelComplete { level } = event {
                info!("level {level} complete");
            }
        }
        events
    }

    /// Dispose the live grid and its blocks.
    pub fn dispose(&mut self) {
        if let Some(blocks) = self.blocks.as_mut() {
            blocks.dispose();
        }
        self.blocks = None;
        self.grid = None;
    }

    /// Replace the live grid, disposing the previous one first so that no
    /// two live grids coexist.
    fn install(&mut self, mut grid: Grid, saved: Option<&LevelState>) {
        self.dispose();

        let mut blocks: BlockGrid = BlockGrid::assemble(&mut grid, self.level, self.events.sender());
        if let Some(state) = saved {
            for b in &state.blocks {
                blocks.set_open(Axial::new(b.q, b.r), b.open);
            }
        }
        self.grid = Some(grid);
        self.blocks = Some(blocks);
    }

    /// The saved state, on the first call only.
    fn take_saved_state(&mut self) -> Option<LevelState> {
        if self.loaded {
            return None;
        }
        self.loaded = true;
        match self.saver.get_state() {
            Ok(state) => state,
            Err(e) => {
                warn!("cannot read the saved level: {e}");
                None
            }
        }
    }
}
