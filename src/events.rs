/*
events.rs

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

//! Typed events from the interactive grid to the game-flow collaborator.
//!
//! The engine never calls back into its consumers. Interaction handlers push
//! [`GridEvent`] values onto a channel, and the session drains the channel
//! once per tick from its update loop.

use log::debug;

use crate::generator::lattice::Axial;

/// Event emitted by the interactive grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// The active frontier advanced to a new block.
    FrontierAdvanced {
        /// Coordinate of the newly active block.
        coord: Axial,
    },

    /// The goal block was reached.
    LevelComplete {
        /// The completed level.
        level: u32,
    },
}

/// Event queue between the grid and the update loop.
#[derive(Debug)]
pub struct EventQueue {
    tx: async_channel::Sender<GridEvent>,
    rx: async_channel::Receiver<GridEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    /// Create the queue.
    pub fn new() -> Self {
        let (tx, rx) = async_channel::unbounded::<GridEvent>();
        Self { tx, rx }
    }

    /// A sender handle for the interactive grid.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Pop one pending event, if any.
    pub fn try_next(&self) -> Option<GridEvent> {
        self.rx.try_recv().ok()
    }

    /// Pop every pending event.
    pub fn drain(&self) -> Vec<GridEvent> {
        let mut events: Vec<GridEvent> = Vec::new();
        while let Some(e) = self.try_next() {
            events.push(e);
        }
        events
    }
}

/// Sending side of the event queue.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: async_channel::Sender<GridEvent>,
}

impl EventSender {
    /// Publish an event. Delivery on a closed queue is silently dropped.
    pub fn send(&self, event: GridEvent) {
        debug!("event: {event:?}");
        let _ = self.tx.send_blocking(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_drained_in_order() {
        let queue: EventQueue = EventQueue::new();
        let sender: EventSender = queue.sender();
        sender.send(GridEvent::FrontierAdvanced {
            coord: Axial::new(1, 0),
        });
        sender.send(GridEvent::LevelComplete { level: 3 });

        assert_eq!(
            queue.drain(),
            vec![
                GridEvent::FrontierAdvanced {
                    coord: Axial::new(1, 0)
                },
                GridEvent::LevelComplete { level: 3 },
            ]
        );
        assert_eq!(queue.try_next(), None);
    }
}
