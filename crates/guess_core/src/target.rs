//! Where secret numbers come from.
//!
//! Target selection is a capability handed to the game rather than a
//! hardwired call, so tests can pin the target and servers can seed it.

use crate::state::{MAX_GUESS, MIN_GUESS};
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Supplies secret numbers for new games.
pub trait TargetSource {
    /// Draws the next target, always within `MIN_GUESS..=MAX_GUESS`.
    fn next_target(&mut self) -> u32;
}

impl<T: TargetSource + ?Sized> TargetSource for Box<T> {
    fn next_target(&mut self) -> u32 {
        (**self).next_target()
    }
}

/// A fixed target was requested outside the playable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("target {} outside {}..={}", _0, MIN_GUESS, MAX_GUESS)]
pub struct TargetOutOfRange(#[error(not(source))] pub u32);

fn check_target(target: u32) -> Result<u32, TargetOutOfRange> {
    if (MIN_GUESS..=MAX_GUESS).contains(&target) {
        Ok(target)
    } else {
        Err(TargetOutOfRange(target))
    }
}

/// Uniform random targets.
#[derive(Debug, Clone)]
pub struct RandomTarget {
    rng: StdRng,
}

impl RandomTarget {
    /// Seeds from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds deterministically, so the same seed replays the same targets.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TargetSource for RandomTarget {
    fn next_target(&mut self) -> u32 {
        self.rng.random_range(MIN_GUESS..=MAX_GUESS)
    }
}

/// Always the same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTarget(u32);

impl FixedTarget {
    /// Pins every game to `target`.
    pub fn new(target: u32) -> Result<Self, TargetOutOfRange> {
        check_target(target).map(Self)
    }
}

impl TargetSource for FixedTarget {
    fn next_target(&mut self) -> u32 {
        self.0
    }
}

/// Cycles through a fixed list of targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedTargets {
    targets: Vec<u32>,
    next: usize,
}

impl ScriptedTargets {
    /// Plays `targets` in order, wrapping around at the end.
    ///
    /// An empty list behaves like a fixed target of `MIN_GUESS`.
    pub fn new(targets: impl IntoIterator<Item = u32>) -> Result<Self, TargetOutOfRange> {
        let targets = targets
            .into_iter()
            .map(check_target)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { targets, next: 0 })
    }
}

impl TargetSource for ScriptedTargets {
    fn next_target(&mut self) -> u32 {
        if self.targets.is_empty() {
            return MIN_GUESS;
        }
        let target = self.targets[self.next % self.targets.len()];
        self.next = (self.next + 1) % self.targets.len();
        target
    }
}
