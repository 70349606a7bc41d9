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
//! Turn order and win detection for a two sided match.
use log::{debug, info};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{
    board::{setup, Coordinate, FleetError, Grid, ShotOutcome},
    config::GameConfig,
    game::{Combatant, MatchError},
};

/// One of the two sides of a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    /// The human-driven side.
    Player,
    /// The automated side.
    Opponent,
}

impl Side {
    /// Get the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl Distribution<Side> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Side {
        if rng.gen() {
            Side::Player
        } else {
            Side::Opponent
        }
    }
}

/// Which shot outcomes let the shooter fire again.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TurnRule {
    /// Any shot that strikes a vessel, sinking or not, earns another shot. Only a miss
    /// passes the turn.
    ExtraShotOnHit,
    /// A hit that leaves the vessel afloat earns another shot. Sinking a vessel or
    /// missing passes the turn.
    ExtraShotOnHitNotSink,
}

impl TurnRule {
    /// Returns true if the shooter keeps the turn after the given outcome.
    pub fn grants_extra_shot(self, outcome: ShotOutcome) -> bool {
        match (self, outcome) {
            (_, ShotOutcome::Miss) => false,
            (_, ShotOutcome::Hit(_)) => true,
            (TurnRule::ExtraShotOnHit, ShotOutcome::Sunk(_)) => true,
            (TurnRule::ExtraShotOnHitNotSink, ShotOutcome::Sunk(_)) => false,
        }
    }
}

impl Default for TurnRule {
    fn default() -> Self {
        TurnRule::ExtraShotOnHit
    }
}

/// State of the match.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchState {
    /// The player fires next.
    PlayerTurn,
    /// The opponent fires next.
    OpponentTurn,
    /// The given side sank the whole opposing fleet.
    Finished(Side),
}

impl MatchState {
    fn turn_of(side: Side) -> Self {
        match side {
            Side::Player => MatchState::PlayerTurn,
            Side::Opponent => MatchState::OpponentTurn,
        }
    }
}

/// Record of one accepted shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShotReport {
    /// Side that fired.
    pub shooter: Side,
    pub target: Coordinate,
    pub outcome: ShotOutcome,
    /// State of the match after the shot.
    pub state: MatchState,
}

impl ShotReport {
    /// Returns true if the shooter fires again.
    pub fn repeats_turn(&self) -> bool {
        self.state == MatchState::turn_of(self.shooter)
    }
}

/// A match between two sides, each owning one grid.
#[derive(Debug, Clone)]
pub struct Match {
    /// Grid holding the player's fleet.
    player: Grid,
    /// Grid holding the opponent's fleet.
    opponent: Grid,
    state: MatchState,
    rule: TurnRule,
}

impl Match {
    /// Start a match on the given grids. The player fires first. Fails if either grid
    /// has no vessels.
    pub fn new(player: Grid, opponent: Grid, rule: TurnRule) -> Result<Self, MatchError> {
        for &side in &[Side::Player, Side::Opponent] {
            let grid = match side {
                Side::Player => &player,
                Side::Opponent => &opponent,
            };
            if grid.vessel_count() == 0 {
                return Err(MatchError::NoVessels(side));
            }
        }
        Ok(Self::start(player, opponent, rule))
    }

    fn start(player: Grid, opponent: Grid, rule: TurnRule) -> Self {
        Self {
            player,
            opponent,
            state: MatchState::PlayerTurn,
            rule,
        }
    }

    /// Start a match with freshly generated fleets for both sides. The opponent's grid
    /// is marked hidden.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Result<Self, FleetError> {
        let player = setup::random_grid(rng, config)?;
        let mut opponent = setup::random_grid(rng, config)?;
        opponent.set_hidden(true);
        // Validated fleets are never empty.
        Ok(Self::start(player, opponent, config.turn_rule))
    }

    /// Let the given side open the match instead of the player.
    pub fn with_first(mut self, side: Side) -> Self {
        if let MatchState::PlayerTurn | MatchState::OpponentTurn = self.state {
            self.state = MatchState::turn_of(side);
        }
        self
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Get the side whose turn it is. Returns `None` once the match is over.
    pub fn current(&self) -> Option<Side> {
        match self.state {
            MatchState::PlayerTurn => Some(Side::Player),
            MatchState::OpponentTurn => Some(Side::Opponent),
            MatchState::Finished(_) => None,
        }
    }

    /// Get the winner. Returns `None` while the match is in progress.
    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::Finished(side) => Some(side),
            _ => None,
        }
    }

    /// Get the grid holding the given side's fleet.
    pub fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn grid_mut(&mut self, side: Side) -> &mut Grid {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Fire a single shot for the side holding the turn at the opposing grid and advance
    /// the match. A refused shot leaves the match untouched.
    pub fn fire(&mut self, target: Coordinate) -> Result<ShotReport, MatchError> {
        let shooter = self.current().ok_or(MatchError::AlreadyOver)?;
        let outcome = self.grid_mut(shooter.opponent()).resolve_shot(target)?;
        debug!("{:?} fired at {}: {:?}", shooter, target, outcome);

        self.state = if self.opponent.defeated() {
            MatchState::Finished(Side::Player)
        } else if self.player.defeated() {
            MatchState::Finished(Side::Opponent)
        } else if self.rule.grants_extra_shot(outcome) {
            MatchState::turn_of(shooter)
        } else {
            MatchState::turn_of(shooter.opponent())
        };
        if let MatchState::Finished(winner) = self.state {
            info!("{:?} won the match", winner);
        }
        Ok(ShotReport {
            shooter,
            target,
            outcome,
            state: self.state,
        })
    }

    /// Play one shot for the side holding the turn: ask the combatant for targets until
    /// one is accepted. Refused targets are reported back to the combatant and do not
    /// use up the turn.
    pub fn take_turn<C: Combatant + ?Sized>(
        &mut self,
        combatant: &mut C,
    ) -> Result<ShotReport, MatchError> {
        let shooter = self.current().ok_or(MatchError::AlreadyOver)?;
        let dim = *self.grid(shooter.opponent()).dimensions();
        loop {
            let target = combatant
                .choose_target(&dim)
                .map_err(|_| MatchError::Withdrawn(shooter))?;
            match self.fire(target) {
                Ok(report) => {
                    combatant.shot_resolved(report.target, report.outcome);
                    return Ok(report);
                }
                Err(MatchError::Shot(err)) => combatant.shot_rejected(&err),
                Err(err) => return Err(err),
            }
        }
    }

    /// Play until one fleet is destroyed and return the winner.
    pub fn play<P, O>(&mut self, player: &mut P, opponent: &mut O) -> Result<Side, MatchError>
    where
        P: Combatant + ?Sized,
        O: Combatant + ?Sized,
    {
        loop {
            match self.state {
                MatchState::Finished(winner) => return Ok(winner),
                MatchState::PlayerTurn => self.take_turn(player)?,
                MatchState::OpponentTurn => self.take_turn(opponent)?,
            };
        }
    }
}
