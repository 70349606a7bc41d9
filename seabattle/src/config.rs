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
//! Settings for a match: board size, fleet makeup, placement budgets and turn rule.
use thiserror::Error;

use crate::{board::Dimensions, game::TurnRule};

/// Side length of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Largest side length a match may use. Row and column labels stay two digits wide.
pub const MAX_BOARD_SIZE: usize = 26;

/// Vessel lengths of the standard fleet: one of three cells, two of two and four of one.
pub const CANONICAL_FLEET: [usize; 7] = [3, 2, 2, 1, 1, 1, 1];

/// Random placement trials allowed for one board before it is abandoned.
pub const DEFAULT_ATTEMPTS_PER_BOARD: usize = 2000;

/// Boards that may be abandoned before fleet generation gives up entirely.
pub const DEFAULT_MAX_BOARDS: usize = 10_000;

/// Reason a [`GameConfig`] cannot be used.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid board size {0}")]
    BoardSize(usize),
    #[error("the fleet must contain at least one vessel")]
    EmptyFleet,
    #[error("vessel length {length} does not fit on a {size}x{size} board")]
    VesselLength { length: usize, size: usize },
    #[error("placement budgets must be nonzero")]
    ZeroBudget,
}

/// Everything needed to set up a match.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    /// Side length of both boards.
    pub board_size: usize,
    /// Length of every vessel each side gets, in placement order.
    pub fleet: Vec<usize>,
    /// Random trials for one board before it is thrown away and restarted.
    pub attempts_per_board: usize,
    /// Boards that may be thrown away before placement reports failure.
    pub max_boards: usize,
    /// Which shot outcomes let the shooter fire again.
    pub turn_rule: TurnRule,
}

impl GameConfig {
    /// Check that the settings describe a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dim = self.dimensions()?;
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(&length) = self
            .fleet
            .iter()
            .find(|&&length| length == 0 || length > dim.size())
        {
            return Err(ConfigError::VesselLength {
                length,
                size: dim.size(),
            });
        }
        if self.attempts_per_board == 0 || self.max_boards == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(())
    }

    /// Board [`Dimensions`] for these settings. Sizes above [`MAX_BOARD_SIZE`] are
    /// refused.
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        Dimensions::try_new(self.board_size).ok_or(ConfigError::BoardSize(self.board_size))
    }
}

impl Default for GameConfig {
    /// The standard match: 6x6 boards with the canonical seven vessel fleet.
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            fleet: CANONICAL_FLEET.to_vec(),
            attempts_per_board: DEFAULT_ATTEMPTS_PER_BOARD,
            max_boards: DEFAULT_MAX_BOARDS,
            turn_rule: TurnRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.fleet.len(), 7);
    }

    #[test]
    fn rejects_bad_settings() {
        let mut config = GameConfig {
            board_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BoardSize(0)));

        config.board_size = 100_000;
        config.fleet = vec![1];
        assert_eq!(config.validate(), Err(ConfigError::BoardSize(100_000)));

        config.board_size = MAX_BOARD_SIZE + 1;
        assert_eq!(config.validate(), Err(ConfigError::BoardSize(MAX_BOARD_SIZE + 1)));

        config.board_size = MAX_BOARD_SIZE;
        assert_eq!(config.validate(), Ok(()));

        config.board_size = 4;
        config.fleet = vec![2, 5];
        assert_eq!(
            config.validate(),
            Err(ConfigError::VesselLength { length: 5, size: 4 })
        );

        config.fleet = vec![];
        assert_eq!(config.validate(), Err(ConfigError::EmptyFleet));

        config.fleet = vec![0];
        assert_eq!(
            config.validate(),
            Err(ConfigError::VesselLength { length: 0, size: 4 })
        );

        config.fleet = vec![1];
        config.attempts_per_board = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBudget));
    }
}
