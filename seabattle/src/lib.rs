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
//! Sea battle on a small square board.
//!
//! Each side owns a [`Grid`] holding a fleet of straight [`Vessel`]s. Fleets are laid
//! out at random by [`board::setup`], with a one cell gap around every vessel so no two
//! vessels touch, diagonals included. A [`Match`] then alternates shots between two
//! [`Combatant`]s until one fleet has been sunk.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use seabattle::{GameConfig, Match, RandomCombatant};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Match::random(&mut rng, &GameConfig::default()).unwrap();
//! let mut player = RandomCombatant::new(StdRng::seed_from_u64(1));
//! let mut opponent = RandomCombatant::new(StdRng::seed_from_u64(2));
//! let winner = game.play(&mut player, &mut opponent).unwrap();
//! assert!(game.grid(winner.opponent()).defeated());
//! ```

pub mod board;
pub mod config;
pub mod game;
mod vessel;

pub use crate::{
    board::{CellState, Coordinate, Dimensions, Grid, ShotOutcome},
    config::GameConfig,
    game::{Combatant, Match, MatchState, RandomCombatant, Side, TurnRule},
    vessel::{Orientation, Vessel},
};
