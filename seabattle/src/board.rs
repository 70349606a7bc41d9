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
//! Types that make up the game board.

use log::trace;

use crate::vessel::Vessel;

use self::cells::{Cells, Mark};
pub use self::{
    coordinate::Coordinate,
    dimensions::{Dimensions, Neighbors},
    errors::{
        CannotPlaceReason, CannotShootReason, FleetError, PlaceError, PlacementExhausted,
        ShotError,
    },
};

mod cells;
mod coordinate;
mod dimensions;
mod errors;
pub mod setup;

/// Observable state of a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CellState {
    /// Nothing here and nothing fired at it.
    Empty,
    /// An undamaged part of a vessel.
    Ship,
    /// A part of a vessel that has been shot.
    Hit,
    /// A shot that found nothing, or a cell revealed empty when a neighbor sank.
    Miss,
    /// Touches a vessel. Looks empty until revealed.
    Buffer,
}

/// Result of a shot on a single player's grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the vessel with the given index, but did not sink it.
    Hit(usize),
    /// The shot hit the vessel with the given index and sank it.
    Sunk(usize),
}

/// Represents a single player's grid: their vessels and their side of the ocean.
///
/// Cells covered by a vessel, and the ring of cells around each vessel, are reserved
/// during placement so no two vessels ever touch, not even diagonally. Shots are tracked
/// separately and each cell may be shot at most once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    cells: Cells,

    /// Vessels in placement order. Indexes are stable for the life of the grid.
    vessels: Vec<Vessel>,

    destroyed: usize,

    /// Render-only flag: whether undamaged vessel cells should be concealed.
    hidden: bool,
}

impl Grid {
    /// Construct an empty grid with the given [`Dimensions`].
    pub fn new(dim: Dimensions) -> Self {
        Self {
            cells: Cells::new(dim),
            vessels: Vec::new(),
            destroyed: 0,
            hidden: false,
        }
    }

    /// Get the [`Dimensions`] of this [`Grid`].
    pub fn dimensions(&self) -> &Dimensions {
        &self.cells.dim
    }

    /// Length of one side of the grid.
    pub fn size(&self) -> usize {
        self.cells.dim.size()
    }

    /// Whether undamaged vessels should be concealed when this grid is shown.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// All vessels on the grid, destroyed ones included, in placement order.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn vessel_count(&self) -> usize {
        self.vessels.len()
    }

    /// Number of vessels with no hits remaining.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Returns true if the grid holds vessels and every one of them has been destroyed.
    pub fn defeated(&self) -> bool {
        !self.vessels.is_empty() && self.destroyed == self.vessels.len()
    }

    /// Returns true if the coordinate lies outside the grid.
    pub fn is_out_of_bounds(&self, coord: Coordinate) -> bool {
        !self.cells.dim.contains(coord)
    }

    /// Returns true if the coordinate was shot at or revealed. Always false for
    /// coordinates outside the grid.
    pub fn is_already_targeted(&self, coord: Coordinate) -> bool {
        self.cells.get(coord).map_or(false, |cell| cell.targeted())
    }

    /// Returns true if a new vessel may not cover the coordinate, because a vessel, a
    /// buffer or a shot is already there. Always false for coordinates outside the grid.
    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.cells.get(coord).map_or(false, |cell| cell.occupied())
    }

    /// Get the state of the cell at the given coordinate. Returns `None` if the
    /// coordinate is out of bounds.
    pub fn cell_state(&self, coord: Coordinate) -> Option<CellState> {
        self.cells.get(coord).map(|cell| cell.state())
    }

    /// Get an iterator over the rows of this grid. Each row is an iterator over the
    /// states of the cells in that row.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellState>> {
        let cells = &self.cells;
        self.cells
            .dim
            .iter_coordinates()
            .map(move |row| row.map(move |coord| cells[coord].state()))
    }

    /// Attempts to place the vessel. On success every cell of the vessel is marked as a
    /// ship and the ring of cells around it is reserved as a buffer. On failure the grid
    /// is left untouched and the vessel is handed back inside the error.
    pub fn place_vessel(&mut self, vessel: Vessel) -> Result<(), PlaceError> {
        let cells = &self.cells;
        let blocked = vessel
            .occupied_cells()
            .find_map(|coord| match cells.get(coord) {
                None => Some(CannotPlaceReason::OutOfBounds),
                Some(cell) if cell.occupied() => Some(CannotPlaceReason::Collision),
                _ => None,
            });
        if let Some(reason) = blocked {
            return Err(PlaceError::new(reason, vessel));
        }
        // Already ensured that every position is valid and free.
        let idx = self.vessels.len();
        for coord in vessel.occupied_cells() {
            let cell = &mut self.cells[coord];
            cell.vessel = Some(idx);
            cell.marks.insert(Mark::Ship);
        }
        trace!("placed vessel {} of length {} at {}", idx, vessel.len(), vessel.origin());
        self.vessels.push(vessel);
        self.mark_surroundings(idx, Mark::Buffer);
        Ok(())
    }

    /// Fire a shot at this grid, returning the outcome or the reason the shot was
    /// refused. A refused shot never changes the grid.
    pub fn resolve_shot(&mut self, target: Coordinate) -> Result<ShotOutcome, ShotError> {
        let hit_vessel = match self.cells.get_mut(target) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, target)),
            Some(cell) if cell.targeted() => {
                return Err(ShotError::new(CannotShootReason::AlreadyShot, target))
            }
            Some(cell) => {
                cell.marks.insert(Mark::Targeted);
                cell.vessel
            }
        };
        Ok(match hit_vessel {
            None => ShotOutcome::Miss,
            Some(idx) => {
                if self.vessels[idx].register_hit() {
                    self.destroyed += 1;
                    self.mark_surroundings(idx, Mark::Targeted);
                    ShotOutcome::Sunk(idx)
                } else {
                    ShotOutcome::Hit(idx)
                }
            }
        })
    }

    /// Forget every shot fired at this grid while keeping vessel and buffer
    /// reservations. Only meaningful before play begins; vessel damage is untouched.
    pub(crate) fn clear_shot_history(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.marks.remove(Mark::Targeted);
        }
    }

    /// Apply `mark` to every in-bounds cell touching the vessel at `idx` that is not
    /// itself part of a vessel.
    fn mark_surroundings(&mut self, idx: usize, mark: Mark) {
        let dim = self.cells.dim;
        let vessel = &self.vessels[idx];
        for coord in vessel.occupied_cells() {
            for neighbor in dim.neighbors(coord) {
                let cell = &mut self.cells[neighbor];
                if !cell.marks.contains(Mark::Ship) {
                    cell.marks.insert(mark);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::Orientation;

    fn grid() -> Grid {
        Grid::new(Dimensions::new(6))
    }

    #[test]
    fn placed_vessel_cells_become_ship() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(2, 1), 3, Orientation::Vertical))
            .unwrap();
        for x in 2..5 {
            assert_eq!(grid.cell_state(Coordinate::new(x, 1)), Some(CellState::Ship));
        }
        assert_eq!(grid.vessel_count(), 1);
        assert_eq!(grid.cell_state(Coordinate::new(1, 0)), Some(CellState::Buffer));
        assert_eq!(grid.cell_state(Coordinate::new(5, 2)), Some(CellState::Buffer));
        assert_eq!(grid.cell_state(Coordinate::new(0, 0)), Some(CellState::Empty));
    }

    #[test]
    fn diagonal_neighbor_collides() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 3, Orientation::Horizontal))
            .unwrap();
        let before = grid.clone();
        let err = grid
            .place_vessel(Vessel::new(Coordinate::new(1, 1), 1, Orientation::Horizontal))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::Collision);
        assert_eq!(err.into_vessel().origin(), Coordinate::new(1, 1));
        assert_eq!(grid, before);
        assert_eq!(grid.vessel_count(), 1);
    }

    #[test]
    fn overhanging_vessel_is_out_of_bounds_and_leaves_grid_alone() {
        let mut grid = grid();
        let before = grid.clone();
        let err = grid
            .place_vessel(Vessel::new(Coordinate::new(0, 4), 3, Orientation::Horizontal))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        assert_eq!(grid, before);

        let err = grid
            .place_vessel(Vessel::new(Coordinate::new(6, 0), 1, Orientation::Vertical))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
    }

    #[test]
    fn two_cells_apart_is_fine() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 3, Orientation::Horizontal))
            .unwrap();
        grid.place_vessel(Vessel::new(Coordinate::new(2, 0), 2, Orientation::Horizontal))
            .unwrap();
        assert_eq!(grid.vessel_count(), 2);
    }

    #[test]
    fn sinking_single_cell_reveals_neighbors() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 1, Orientation::Horizontal))
            .unwrap();
        assert_eq!(grid.resolve_shot(Coordinate::new(0, 0)), Ok(ShotOutcome::Sunk(0)));
        assert_eq!(grid.destroyed_count(), 1);
        assert!(grid.defeated());
        for n in grid.dimensions().neighbors(Coordinate::new(0, 0)) {
            assert!(grid.is_already_targeted(n));
            assert_eq!(grid.cell_state(n), Some(CellState::Miss));
        }
        assert_eq!(grid.cell_state(Coordinate::new(0, 0)), Some(CellState::Hit));
    }

    #[test]
    fn sinking_interior_vessel_reveals_all_eight() {
        let mut grid = grid();
        let center = Coordinate::new(3, 3);
        grid.place_vessel(Vessel::new(center, 1, Orientation::Vertical))
            .unwrap();
        grid.resolve_shot(center).unwrap();
        let revealed = grid
            .dimensions()
            .neighbors(center)
            .filter(|&n| grid.is_already_targeted(n))
            .count();
        assert_eq!(revealed, 8);
        let err = grid.resolve_shot(Coordinate::new(2, 2)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyShot);
    }

    #[test]
    fn hit_then_sink() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(4, 2), 2, Orientation::Horizontal))
            .unwrap();
        assert_eq!(grid.resolve_shot(Coordinate::new(4, 3)), Ok(ShotOutcome::Hit(0)));
        assert_eq!(grid.vessels()[0].remaining_hits(), 1);
        assert_eq!(grid.destroyed_count(), 0);
        assert_eq!(grid.resolve_shot(Coordinate::new(4, 2)), Ok(ShotOutcome::Sunk(0)));
        assert_eq!(grid.destroyed_count(), 1);
    }

    #[test]
    fn repeated_shot_is_rejected_without_change() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(4, 2), 2, Orientation::Horizontal))
            .unwrap();
        assert_eq!(grid.resolve_shot(Coordinate::new(1, 1)), Ok(ShotOutcome::Miss));
        assert_eq!(grid.cell_state(Coordinate::new(1, 1)), Some(CellState::Miss));
        let before = grid.clone();
        let err = grid.resolve_shot(Coordinate::new(1, 1)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyShot);
        assert_eq!(err.coord(), Coordinate::new(1, 1));
        assert_eq!(grid, before);
    }

    #[test]
    fn shot_off_the_board_is_rejected() {
        let mut grid = grid();
        for target in &[Coordinate::new(-1, 0), Coordinate::new(0, 6)] {
            assert!(grid.is_out_of_bounds(*target));
            let err = grid.resolve_shot(*target).unwrap_err();
            assert_eq!(err.reason(), CannotShootReason::OutOfBounds);
        }
    }

    #[test]
    fn buffer_cells_can_be_shot_before_sinking() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 2, Orientation::Horizontal))
            .unwrap();
        assert_eq!(grid.resolve_shot(Coordinate::new(1, 0)), Ok(ShotOutcome::Miss));
    }

    #[test]
    fn clearing_history_keeps_reservations() {
        let mut grid = grid();
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 1, Orientation::Horizontal))
            .unwrap();
        grid.resolve_shot(Coordinate::new(5, 5)).unwrap();
        grid.clear_shot_history();
        assert!(!grid.is_already_targeted(Coordinate::new(5, 5)));
        assert!(grid.is_occupied(Coordinate::new(0, 1)));
        assert_eq!(grid.cell_state(Coordinate::new(0, 0)), Some(CellState::Ship));
    }

    #[test]
    fn empty_grid_is_not_defeated() {
        assert!(!grid().defeated());
    }
}
