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
use thiserror::Error;

use crate::{board::ShotError, game::Side};

/// Returned by a [`Combatant`][crate::game::Combatant] that will not pick any more
/// targets, for example because its input was closed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("combatant withdrew from the match")]
pub struct Withdrawn;

/// Reason a turn could not be played.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MatchError {
    /// The match already has a winner.
    #[error("the match is already over")]
    AlreadyOver,

    /// The given side's grid holds no vessels, so the match could never end.
    #[error("{0:?} has no vessels")]
    NoVessels(Side),

    /// The side holding the turn stopped choosing targets.
    #[error("{0:?} withdrew from the match")]
    Withdrawn(Side),

    /// The target was refused by the opposing grid. The turn is not consumed.
    #[error(transparent)]
    Shot(#[from] ShotError),
}
