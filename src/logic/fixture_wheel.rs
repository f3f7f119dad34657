//! Fixture wheel: spin clubs out of their pools into a fixture list.

use crate::models::{FixtureWheel, Wheel};
use rand::Rng;

impl FixtureWheel {
    /// Wheel that fills the next open slot, None once every fixture is drawn.
    pub fn next_wheel(&self) -> Option<Wheel> {
        let fixture = self.fixtures.get(self.current)?;
        if self.mode.has_medium_wheel() && fixture.team1.is_some() {
            Some(Wheel::Medium)
        } else {
            Some(Wheel::Strong)
        }
    }

    /// Spin `wheel`: a uniformly chosen club leaves its pool and fills the next open slot.
    /// Returns the club, or None if it is not this wheel's turn or its pool is empty.
    pub fn spin<R: Rng + ?Sized>(&mut self, wheel: Wheel, rng: &mut R) -> Option<String> {
        if self.next_wheel() != Some(wheel) {
            return None;
        }
        let (pool, chosen) = match wheel {
            Wheel::Strong => (&mut self.strong_pool, &mut self.chosen_strong),
            Wheel::Medium => (&mut self.medium_pool, &mut self.chosen_medium),
        };
        if pool.is_empty() {
            return None;
        }
        let club = pool.remove(rng.gen_range(0..pool.len()));
        chosen.push(club.clone());

        let fixture = &mut self.fixtures[self.current];
        if fixture.team1.is_none() {
            fixture.team1 = Some(club.clone());
        } else {
            fixture.team2 = Some(club.clone());
            self.current += 1;
        }
        Some(club)
    }

    pub fn spin_strong<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        self.spin(Wheel::Strong, rng)
    }

    pub fn spin_medium<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        self.spin(Wheel::Medium, rng)
    }

    /// Draw every remaining slot at once. Stops early if a pool runs dry.
    pub fn fast_complete<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut spins = 0;
        while let Some(wheel) = self.next_wheel() {
            if self.spin(wheel, rng).is_none() {
                break;
            }
            spins += 1;
        }
        spins
    }

    /// Start over in the same mode.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}
