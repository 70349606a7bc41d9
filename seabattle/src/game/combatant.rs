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
use rand::Rng;

use crate::{
    board::{Coordinate, Dimensions, ShotError, ShotOutcome},
    game::Withdrawn,
};

/// One side of a match: something that can pick where to fire.
///
/// Targets need not be valid. The opposing grid rejects shots that are off the board
/// or repeat an earlier shot; the combatant is told through [`shot_rejected`] and asked
/// again.
///
/// [`shot_rejected`]: Combatant::shot_rejected
pub trait Combatant {
    /// Pick the next target on an opposing grid of the given dimensions.
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn>;

    /// The last target was refused. Another will be requested.
    fn shot_rejected(&mut self, _err: &ShotError) {}

    /// The last target was accepted with the given outcome.
    fn shot_resolved(&mut self, _target: Coordinate, _outcome: ShotOutcome) {}
}

impl<C: Combatant + ?Sized> Combatant for &mut C {
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn> {
        (**self).choose_target(dim)
    }

    fn shot_rejected(&mut self, err: &ShotError) {
        (**self).shot_rejected(err)
    }

    fn shot_resolved(&mut self, target: Coordinate, outcome: ShotOutcome) {
        (**self).shot_resolved(target, outcome)
    }
}

impl<C: Combatant + ?Sized> Combatant for Box<C> {
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn> {
        (**self).choose_target(dim)
    }

    fn shot_rejected(&mut self, err: &ShotError) {
        (**self).shot_rejected(err)
    }

    fn shot_resolved(&mut self, target: Coordinate, outcome: ShotOutcome) {
        (**self).shot_resolved(target, outcome)
    }
}

/// Automated combatant that fires at a uniformly random cell of the board every time.
/// It keeps no memory of earlier shots and relies on the grid to refuse repeats.
#[derive(Debug, Clone)]
pub struct RandomCombatant<R> {
    rng: R,
}

impl<R: Rng> RandomCombatant<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Combatant for RandomCombatant<R> {
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn> {
        let size = dim.size() as i32;
        Ok(Coordinate::new(
            self.rng.gen_range(0, size),
            self.rng.gen_range(0, size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn random_targets_stay_on_the_board() {
        let dim = Dimensions::new(6);
        let mut combatant = RandomCombatant::new(StdRng::seed_from_u64(9));
        for _ in 0..1000 {
            let target = combatant.choose_target(&dim).unwrap();
            assert!(dim.contains(target));
        }
    }

    #[test]
    fn random_targets_reach_every_cell() {
        let dim = Dimensions::new(3);
        let mut combatant = RandomCombatant::new(StdRng::seed_from_u64(2));
        let mut seen = vec![false; dim.total_size()];
        for _ in 0..500 {
            let target = combatant.choose_target(&dim).unwrap();
            seen[dim.try_linearize(target).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
