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
//! Errors used by the `Grid` and fleet placement.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{board::Coordinate, config::ConfigError, vessel::Vessel};

/// Reason why a vessel could not be placed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// One or more cells of the vessel fall outside the board.
    #[error("the vessel does not fit on the board")]
    OutOfBounds,
    /// One or more cells overlap another vessel or the buffer around it.
    #[error("the vessel touches or overlaps another vessel")]
    Collision,
}

/// Error caused when attempting to place a vessel in an invalid position. Gives back
/// the rejected vessel.
#[derive(Error, Clone, Eq, PartialEq)]
#[error("could not place vessel: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    vessel: Vessel,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    pub(super) fn new(reason: CannotPlaceReason, vessel: Vessel) -> Self {
        Self { reason, vessel }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get a reference to the vessel that was rejected.
    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    /// Extract the rejected vessel from this error.
    pub fn into_vessel(self) -> Vessel {
        self.vessel
    }
}

/// Reason why a particular cell could not be shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the board.
    #[error("the shot lands outside the board")]
    OutOfBounds,

    /// A shot has already been fired at that cell, or it was revealed as empty.
    #[error("that cell has already been shot")]
    AlreadyShot,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not shoot cell {coord}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(super) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Error returned when a single board could not be filled within its attempt budget.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("gave up after {attempts} placement attempts with {placed} of {total} vessels placed")]
pub struct PlacementExhausted {
    /// Attempts spent on the board.
    pub attempts: usize,
    /// Vessels that had been placed when the budget ran out.
    pub placed: usize,
    /// Vessels in the fleet.
    pub total: usize,
}

/// Error returned when no complete fleet could be generated.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FleetError {
    /// Every board attempt ran out of placement attempts.
    #[error("no board could be filled after {boards} tries")]
    Exhausted {
        /// Number of boards abandoned.
        boards: usize,
        /// Failure of the final board.
        #[source]
        last: PlacementExhausted,
    },
    /// The fleet settings were unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
