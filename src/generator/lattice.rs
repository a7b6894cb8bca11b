/*
lattice.rs

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

//! Bounded hexagonal lattice on axial coordinates.
//!
//! The lattice is pure geometry: it enumerates the cells within a given
//! radius of the origin and answers adjacency queries. It holds no game
//! state. A lattice of radius `r` contains `3r² + 3r + 1` cells.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum_macros::FromRepr;

use crate::errors::GridError;

/// Axial coordinate of a hex cell.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    /// The lattice origin.
    pub const ORIGIN: Axial = Axial { q: 0, r: 0 };

    /// Create an axial coordinate.
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Hex distance from the origin.
    pub fn distance(&self) -> i32 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    /// The adjacent coordinate in the given direction.
    pub fn neighbor(&self, direction: Direction) -> Axial {
        let (dq, dr) = direction.delta();
        Axial::new(self.q + dq, self.r + dr)
    }

    /// The six adjacent coordinates, in [`Direction::ALL`] order, irrespective
    /// of any radius bound.
    pub fn neighbors(&self) -> [Axial; 6] {
        let mut out: [Axial; 6] = [*self; 6];
        for (i, d) in Direction::ALL.iter().enumerate() {
            out[i] = self.neighbor(*d);
        }
        out
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// One of the six hex directions.
///
/// The discriminant is the bit index used in connection bitmasks, so the
/// serialized mask layout follows this enumeration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Direction {
    E = 0,
    Ne = 1,
    Nw = 2,
    W = 3,
    Sw = 4,
    Se = 5,
}

impl Direction {
    /// All directions, in bit-index order.
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::Ne,
        Direction::Nw,
        Direction::W,
        Direction::Sw,
        Direction::Se,
    ];

    /// Axial coordinate delta for the direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::E => (1, 0),
            Direction::Ne => (1, -1),
            Direction::Nw => (0, -1),
            Direction::W => (-1, 0),
            Direction::Sw => (-1, 1),
            Direction::Se => (0, 1),
        }
    }

    /// Bit used for the direction in a connection bitmask.
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// The direction pointing back.
    pub fn opposite(self) -> Direction {
        // Directions are laid out so that the opposite is three steps away.
        Direction::from_repr((self as u8 + 3) % 6).expect("direction arithmetic stays in 0..6")
    }

    /// The direction from `from` to the adjacent coordinate `to`, or [`None`]
    /// if the two coordinates are not adjacent.
    pub fn between(from: Axial, to: Axial) -> Option<Direction> {
        let delta: (i32, i32) = (to.q - from.q, to.r - from.r);
        Direction::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// Number of cells within the given radius.
pub fn cell_count(radius: i32) -> usize {
    (3 * radius * radius + 3 * radius + 1) as usize
}

/// The set of cells within a given radius of the origin.
#[derive(Debug, Clone)]
pub struct Lattice {
    radius: i32,

    /// Cells in the fixed enumeration order (ascending `q`, then `r`). The
    /// position of a cell in this vector is its lattice index, used for all
    /// deterministic tie-breaking.
    cells: Vec<Axial>,

    /// Reverse lookup from a coordinate to its lattice index.
    index: HashMap<Axial, usize>,
}

impl Lattice {
    /// Enumerate the cells within `radius` of the origin.
    ///
    /// # Errors
    ///
    /// A negative radius is a configuration error.
    pub fn new(radius: i32) -> Result<Self, GridError> {
        if radius < 0 {
            return Err(GridError::configuration(
                "radius",
                radius,
                "must not be negative",
            ));
        }

        let mut cells: Vec<Axial> = Vec::with_capacity(cell_count(radius));
        for q in -radius..=radius {
            let low: i32 = (-radius).max(-q - radius);
            let high: i32 = radius.min(-q + radius);
            for r in low..=high {
                cells.push(Axial::new(q, r));
            }
        }

        let index: HashMap<Axial, usize> =
            cells.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        Ok(Self {
            radius,
            cells,
            index,
        })
    }

    /// The lattice radius.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Number of cells in the lattice.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the lattice is empty. A valid lattice never is: radius 0 still
    /// contains the origin.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells in the fixed enumeration order.
    pub fn cells(&self) -> &[Axial] {
        &self.cells
    }

    /// Whether the coordinate is within the lattice radius.
    pub fn contains(&self, cell: Axial) -> bool {
        self.index.contains_key(&cell)
    }

    /// Lattice index of the coordinate, if in radius.
    pub fn index_of(&self, cell: Axial) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    /// The in-radius neighbors of the given coordinate, in direction order.
    pub fn neighbors_in(&self, cell: Axial) -> impl Iterator<Item = Axial> + '_ {
        cell.neighbors().into_iter().filter(|n| self.contains(*n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_counts_follow_the_hex_formula() {
        for radius in 0..=5 {
            let lattice: Lattice = Lattice::new(radius).unwrap();
            assert_eq!(lattice.len(), cell_count(radius));
        }
        assert_eq!(cell_count(0), 1);
        assert_eq!(cell_count(1), 7);
        assert_eq!(cell_count(2), 19);
        assert_eq!(cell_count(3), 37);
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert!(matches!(
            Lattice::new(-1),
            Err(GridError::Configuration { field: "radius", .. })
        ));
    }

    #[test]
    fn every_cell_is_within_radius() {
        let lattice: Lattice = Lattice::new(4).unwrap();
        assert!(lattice.cells().iter().all(|c| c.distance() <= 4));
        assert!(lattice.contains(Axial::ORIGIN));
        assert!(!lattice.contains(Axial::new(5, 0)));
    }

    #[test]
    fn enumeration_order_is_ascending() {
        let lattice: Lattice = Lattice::new(3).unwrap();
        let mut sorted: Vec<Axial> = lattice.cells().to_vec();
        sorted.sort();
        assert_eq!(sorted, lattice.cells());
        assert_eq!(lattice.index_of(lattice.cells()[5]), Some(5));
    }

    #[test]
    fn neighbors_are_adjacent_and_distinct() {
        let cell: Axial = Axial::new(2, -1);
        let neighbors: [Axial; 6] = cell.neighbors();
        for n in neighbors {
            assert_eq!(Direction::between(cell, n).map(|d| cell.neighbor(d)), Some(n));
        }
        let mut unique: Vec<Axial> = neighbors.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for d in Direction::ALL {
            let (dq, dr) = d.delta();
            let (oq, or) = d.opposite().delta();
            assert_eq!((dq + oq, dr + or), (0, 0));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn between_returns_none_for_non_adjacent_cells() {
        assert_eq!(Direction::between(Axial::ORIGIN, Axial::new(2, 0)), None);
        assert_eq!(Direction::between(Axial::ORIGIN, Axial::new(1, 1)), None);
        assert_eq!(
            Direction::between(Axial::ORIGIN, Axial::new(1, 0)),
            Some(Direction::E)
        );
    }

    #[test]
    fn in_radius_neighbors_are_filtered() {
        let lattice: Lattice = Lattice::new(1).unwrap();
        // A ring cell has the origin and two ring cells in radius.
        let ring: Axial = Axial::new(1, 0);
        assert_eq!(lattice.neighbors_in(ring).count(), 3);
        assert_eq!(lattice.neighbors_in(Axial::ORIGIN).count(), 6);
    }
}
