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
//! Straight-line vessels and their damage tracking.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::Coordinate;

/// Direction a vessel extends in from its origin.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Cells run along a row; the column increases.
    Horizontal,
    /// Cells run down a column; the row increases.
    Vertical,
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// A straight vessel of a fixed length with a count of the hits it can still take.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Vessel {
    origin: Coordinate,
    length: usize,
    orientation: Orientation,
    remaining_hits: usize,
}

impl Vessel {
    /// Construct an undamaged vessel. Panics if `length` is 0.
    pub fn new(origin: Coordinate, length: usize, orientation: Orientation) -> Self {
        match Self::try_new(origin, length, orientation) {
            Some(vessel) => vessel,
            None => panic!("Vessel length must be nonzero"),
        }
    }

    /// Construct an undamaged vessel. Returns `None` if `length` is 0.
    pub fn try_new(origin: Coordinate, length: usize, orientation: Orientation) -> Option<Self> {
        if length == 0 {
            None
        } else {
            Some(Self {
                origin,
                length,
                orientation,
                remaining_hits: length,
            })
        }
    }

    /// The first cell of the vessel.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Number of cells the vessel covers.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Hits left before the vessel is destroyed.
    pub fn remaining_hits(&self) -> usize {
        self.remaining_hits
    }

    /// Returns true once every cell of the vessel has been hit.
    pub fn is_destroyed(&self) -> bool {
        self.remaining_hits == 0
    }

    /// Iterate the `len()` consecutive cells starting at the origin.
    pub fn occupied_cells(&self) -> impl '_ + Iterator<Item = Coordinate> {
        (0..self.length).map(move |i| self.origin.advance(self.orientation, i as i32))
    }

    /// Returns true if the vessel covers the given coordinate.
    pub fn covers(&self, coord: Coordinate) -> bool {
        self.occupied_cells().any(|cell| cell == coord)
    }

    /// Record one hit on the vessel. Returns true if this hit destroyed it. Hits on an
    /// already destroyed vessel are ignored.
    pub(crate) fn register_hit(&mut self) -> bool {
        match self.remaining_hits {
            0 => false,
            n => {
                self.remaining_hits = n - 1;
                self.remaining_hits == 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_cells_advance_column() {
        let vessel = Vessel::new(Coordinate::new(0, 0), 3, Orientation::Horizontal);
        let cells: Vec<_> = vessel.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2)
            ]
        );
    }

    #[test]
    fn vertical_cells_advance_row() {
        let vessel = Vessel::new(Coordinate::new(1, 4), 2, Orientation::Vertical);
        assert!(vessel.covers(Coordinate::new(2, 4)));
        assert!(!vessel.covers(Coordinate::new(1, 5)));
        assert_eq!(vessel.occupied_cells().count(), 2);
    }

    #[test]
    fn hits_count_down_to_destruction() {
        let mut vessel = Vessel::new(Coordinate::new(0, 0), 2, Orientation::Vertical);
        assert!(!vessel.register_hit());
        assert_eq!(vessel.remaining_hits(), 1);
        assert!(vessel.register_hit());
        assert!(vessel.is_destroyed());
        assert!(!vessel.register_hit());
        assert_eq!(vessel.remaining_hits(), 0);
    }

    #[test]
    fn zero_length_is_refused() {
        assert_eq!(
            Vessel::try_new(Coordinate::new(0, 0), 0, Orientation::Horizontal),
            None
        );
        assert!(Vessel::try_new(Coordinate::new(0, 0), 1, Orientation::Vertical).is_some());
    }

    #[test]
    #[should_panic]
    fn zero_length_panics() {
        Vessel::new(Coordinate::new(0, 0), 0, Orientation::Horizontal);
    }
}
