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
//! Setup phase of a grid: random fleet placement.
//!
//! Placement draws a random origin and orientation for each vessel and lets
//! [`Grid::place_vessel`] accept or refuse it. A board gets a fixed number of draws; if
//! it runs out, it is thrown away and a fresh one is started. The number of fresh boards
//! is itself capped so a fleet that cannot fit reports an error instead of spinning.
use log::{debug, info, trace, warn};
use rand::Rng;

use crate::{
    board::{Coordinate, Dimensions, FleetError, Grid, PlacementExhausted},
    config::{ConfigError, GameConfig},
    vessel::Vessel,
};

/// Draw a random origin with both axes in `[0, size]`. The upper bound is inclusive, so
/// some origins fall just off the board and are refused by placement.
pub fn random_origin<R: Rng + ?Sized>(rng: &mut R, dim: &Dimensions) -> Coordinate {
    let bound = dim.size() as i32 + 1;
    Coordinate::new(rng.gen_range(0, bound), rng.gen_range(0, bound))
}

/// Try to place every vessel of `lengths` on `grid`, in order, using at most `budget`
/// random draws in total.
///
/// On success the grid's shot history is cleared and it is ready for play. If the
/// budget runs out the partially filled grid is dropped and
/// [`FleetError::Exhausted`] reports a single abandoned board. A length of 0 or one
/// longer than the grid is refused with [`ConfigError::VesselLength`] before any draw.
pub fn attempt_placement<R: Rng + ?Sized>(
    rng: &mut R,
    mut grid: Grid,
    lengths: &[usize],
    budget: usize,
) -> Result<Grid, FleetError> {
    let dim = *grid.dimensions();
    if let Some(&length) = lengths
        .iter()
        .find(|&&length| length == 0 || length > dim.size())
    {
        return Err(ConfigError::VesselLength {
            length,
            size: dim.size(),
        }
        .into());
    }
    let mut attempts = 0;
    for (placed, &length) in lengths.iter().enumerate() {
        loop {
            if attempts >= budget {
                return Err(FleetError::Exhausted {
                    boards: 1,
                    last: PlacementExhausted {
                        attempts,
                        placed,
                        total: lengths.len(),
                    },
                });
            }
            attempts += 1;
            let vessel = Vessel::new(random_origin(rng, &dim), length, rng.gen());
            match grid.place_vessel(vessel) {
                Ok(()) => break,
                Err(err) => trace!("attempt {}: {}", attempts, err),
            }
        }
    }
    grid.clear_shot_history();
    Ok(grid)
}

/// Generate a grid holding the whole fleet described by `config`.
///
/// Boards that exhaust `config.attempts_per_board` are restarted from scratch, up to
/// `config.max_boards` times.
pub fn random_grid<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Result<Grid, FleetError> {
    config.validate()?;
    let dim = config.dimensions()?;
    let mut last = None;
    for board in 1..=config.max_boards {
        match attempt_placement(rng, Grid::new(dim), &config.fleet, config.attempts_per_board) {
            Ok(grid) => {
                info!(
                    "placed {} vessels on a {}x{} board after {} tries",
                    grid.vessel_count(),
                    dim.size(),
                    dim.size(),
                    board
                );
                return Ok(grid);
            }
            Err(FleetError::Exhausted { last: err, .. }) => {
                debug!("abandoning board {}: {}", board, err);
                last = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    warn!("fleet placement failed after {} boards", config.max_boards);
    // max_boards is validated to be nonzero, so at least one board was tried.
    let last = last.unwrap_or(PlacementExhausted {
        attempts: 0,
        placed: 0,
        total: config.fleet.len(),
    });
    Err(FleetError::Exhausted {
        boards: config.max_boards,
        last,
    })
}
