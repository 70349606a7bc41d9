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
use std::fmt;

use crate::vessel::Orientation;

/// The coordinates of a cell in the grid. `x` is the row and `y` is the column, both
/// counted from zero.
///
/// Coordinates are signed so that positions just off the edge of the board can be
/// represented and rejected by the grid rather than by the caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coordinate {
    /// Row of the cell.
    pub x: i32,
    /// Column of the cell.
    pub y: i32,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the coordinate shifted by the given row and column deltas.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Get the coordinate `steps` cells further along the given [`Orientation`].
    pub fn advance(self, orientation: Orientation, steps: i32) -> Self {
        match orientation {
            Orientation::Horizontal => self.offset(0, steps),
            Orientation::Vertical => self.offset(steps, 0),
        }
    }

    /// Chebyshev distance between two coordinates: the number of king moves needed to
    /// get from one to the other.
    pub fn chebyshev(self, other: Self) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx.max(dy) as u32
    }
}

impl From<(i32, i32)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (i32, i32) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_follows_orientation() {
        let origin = Coordinate::new(2, 3);
        assert_eq!(origin.advance(Orientation::Horizontal, 2), Coordinate::new(2, 5));
        assert_eq!(origin.advance(Orientation::Vertical, 2), Coordinate::new(4, 3));
    }

    #[test]
    fn chebyshev_counts_diagonals_as_one() {
        let c = Coordinate::new(1, 1);
        assert_eq!(c.chebyshev(Coordinate::new(0, 0)), 1);
        assert_eq!(c.chebyshev(Coordinate::new(1, 1)), 0);
        assert_eq!(c.chebyshev(Coordinate::new(3, 0)), 2);
    }
}
