// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Square board dimensions.
use std::{borrow::Borrow, convert::TryFrom};

use crate::board::Coordinate;

/// Row and column offsets of the eight cells surrounding a cell.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Dimensions of a square board. Implements the bounds checks, index linearization and
/// neighbor computation the grid needs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    /// Number of rows, which is also the number of columns.
    size: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] for a `size` x `size` board.
    /// Panics if `size` is 0 or too large to address with [`Coordinate`].
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Some(dim) => dim,
            None if size == 0 => panic!("Dimensions must be nonzero, got {}", size),
            None => panic!("Dimensions too large: {}", size),
        }
    }

    /// Create new [`Dimensions`] for a `size` x `size` board.
    /// Returns `None` if `size` is 0, if `size` does not fit in an `i32` or if
    /// `size * size` overflows.
    pub fn try_new(size: usize) -> Option<Self> {
        if size == 0 || i32::try_from(size).is_err() {
            None
        } else {
            size.checked_mul(size).map(|_| Self { size })
        }
    }

    /// Length of one side of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Compute the total number of cells. Used to allocate storage for the board.
    pub fn total_size(&self) -> usize {
        self.size * self.size
    }

    /// Returns true if the coordinate lies inside `[0, size)` on both axes.
    pub fn contains<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Convert a coordinate to a linear index within these dimensions.
    /// Returns `None` if the coordinate is out of bounds.
    pub fn try_linearize<B: Borrow<Coordinate>>(&self, coord: B) -> Option<usize> {
        let c = coord.borrow();
        let x = usize::try_from(c.x).ok()?;
        let y = usize::try_from(c.y).ok()?;
        if x < self.size && y < self.size {
            Some(x * self.size + y)
        } else {
            None
        }
    }

    /// Get back a coordinate from a linearized index.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate::new((idx / self.size) as i32, (idx % self.size) as i32)
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let size = self.size as i32;
        (0..size).map(move |x| (0..size).map(move |y| Coordinate::new(x, y)))
    }

    /// Iterate the in-bounds cells touching the given coordinate, diagonals included.
    pub fn neighbors(&self, coord: Coordinate) -> Neighbors {
        Neighbors {
            dim: *self,
            coord,
            step: 0,
        }
    }

    /// Return true if the two coordinates touch, diagonally or orthogonally.
    pub fn is_neighbor(&self, c1: &Coordinate, c2: &Coordinate) -> bool {
        self.contains(c1) && self.contains(c2) && c1.chebyshev(*c2) == 1
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 6x6 board.
    fn default() -> Self {
        Self { size: 6 }
    }
}

/// Iterator over the in-bounds neighbors of a coordinate.
#[derive(Debug, Clone)]
pub struct Neighbors {
    dim: Dimensions,
    coord: Coordinate,
    /// Index of the next offset to try in [`NEIGHBOR_OFFSETS`].
    step: usize,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&(dx, dy)) = NEIGHBOR_OFFSETS.get(self.step) {
            self.step += 1;
            let candidate = self.coord.offset(dx, dy);
            if self.dim.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearize_round_trips_every_cell() {
        let dim = Dimensions::new(6);
        for idx in 0..dim.total_size() {
            assert_eq!(dim.try_linearize(dim.un_linearize(idx)), Some(idx));
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        let dim = Dimensions::new(6);
        assert_eq!(dim.try_linearize(Coordinate::new(-1, 0)), None);
        assert_eq!(dim.try_linearize(Coordinate::new(0, 6)), None);
        assert_eq!(dim.try_linearize(Coordinate::new(6, 6)), None);
        assert!(dim.contains(Coordinate::new(5, 5)));
    }

    #[test]
    fn corner_has_three_neighbors() {
        let dim = Dimensions::new(6);
        let mut found: Vec<_> = dim.neighbors(Coordinate::new(0, 0)).collect();
        found.sort_by_key(|c| (c.x, c.y));
        assert_eq!(
            found,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1)
            ]
        );
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let dim = Dimensions::new(6);
        let center = Coordinate::new(2, 3);
        let found: Vec<_> = dim.neighbors(center).collect();
        assert_eq!(found.len(), 8);
        assert!(found.iter().all(|n| dim.is_neighbor(&center, n)));
    }

    #[test]
    fn zero_size_is_invalid() {
        assert_eq!(Dimensions::try_new(0), None);
        assert_eq!(Dimensions::default().size(), 6);
    }
}
