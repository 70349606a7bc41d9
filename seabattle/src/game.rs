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
//! Implementation of the match as a whole.
//!
//! [`Combatant`] is the capability each side needs: pick a target when it is its turn.
//! [`RandomCombatant`] is the automated opponent; interactive front ends supply their
//! own implementation.
//!
//! [`Match`] owns both grids, alternates turns according to a [`TurnRule`] and detects
//! when one fleet has been wiped out.

pub use self::{
    combatant::{Combatant, RandomCombatant},
    controller::{Match, MatchState, ShotReport, Side, TurnRule},
    errors::{MatchError, Withdrawn},
};

mod combatant;
mod controller;
mod errors;
