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
//! Cell storage backing the [`Grid`][crate::board::Grid].
use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use enumflags2::BitFlags;

use crate::board::{CellState, Coordinate, Dimensions};

/// Bookkeeping marks a single cell can carry.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub(super) enum Mark {
    /// Part of a vessel.
    Ship = 0b001,
    /// Touches a vessel; no other vessel may be placed here.
    Buffer = 0b010,
    /// A shot landed here, or the cell was revealed when a neighbor sank.
    Targeted = 0b100,
}

/// A single cell in the grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) struct Cell {
    /// Index into the grid's vessel list of the vessel covering this cell, if any.
    pub(super) vessel: Option<usize>,

    pub(super) marks: BitFlags<Mark>,
}

impl Cell {
    /// Returns true if placement may not use this cell.
    pub(super) fn occupied(&self) -> bool {
        !self.marks.is_empty()
    }

    pub(super) fn targeted(&self) -> bool {
        self.marks.contains(Mark::Targeted)
    }

    /// Collapse the marks into the observable state of the cell.
    pub(super) fn state(&self) -> CellState {
        let ship = self.marks.contains(Mark::Ship);
        match (ship, self.targeted()) {
            (true, true) => CellState::Hit,
            (true, false) => CellState::Ship,
            (false, true) => CellState::Miss,
            (false, false) if self.marks.contains(Mark::Buffer) => CellState::Buffer,
            (false, false) => CellState::Empty,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            vessel: None,
            marks: BitFlags::empty(),
        }
    }
}

/// Flat row-major storage of every cell on the board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) struct Cells {
    /// Dimensions of this board.
    pub(super) dim: Dimensions,
    /// Cells that make up this board.
    cells: Box<[Cell]>,
}

impl Cells {
    pub(super) fn new(dim: Dimensions) -> Self {
        let cells = (0..dim.total_size()).map(|_| Default::default()).collect();
        Self { dim, cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&Cell> {
        self.dim.try_linearize(coord).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut Cell> {
        self.dim
            .try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate every cell mutably.
    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Cells {
    type Output = Cell;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<B: Borrow<Coordinate>> IndexMut<B> for Cells {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
