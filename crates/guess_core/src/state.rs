//! Per-session game record.

use crate::invariants::{GuessInvariants, InvariantSet, InvariantViolation};
use crate::target::TargetSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest number a player may guess.
pub const MIN_GUESS: u32 = 1;

/// Largest number a player may guess.
pub const MAX_GUESS: u32 = 100;

/// Complete state of one player's game.
///
/// Fields are private. A stored game changes only through
/// [`GameEngine`](crate::GameEngine) or by being replaced wholesale with a
/// fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The secret number.
    target: u32,
    /// Counted guesses so far.
    attempts: u32,
    /// Lowest number still consistent with feedback.
    low: u32,
    /// Highest number still consistent with feedback.
    high: u32,
    /// Counted guesses in submission order.
    history: Vec<u32>,
    /// Whether the target has been guessed.
    won: bool,
}

impl GameState {
    /// Creates a fresh game around `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is outside `MIN_GUESS..=MAX_GUESS`. A target
    /// source that produces such a value is broken.
    #[instrument]
    pub fn new(target: u32) -> Self {
        assert!(
            (MIN_GUESS..=MAX_GUESS).contains(&target),
            "target {target} outside {MIN_GUESS}..={MAX_GUESS}"
        );
        Self {
            target,
            attempts: 0,
            low: MIN_GUESS,
            high: MAX_GUESS,
            history: Vec::new(),
            won: false,
        }
    }

    /// Creates a fresh game with a target drawn from `source`.
    pub fn fresh<T: TargetSource + ?Sized>(source: &mut T) -> Self {
        let state = Self::new(source.next_target());
        debug!("Drew target for fresh game");
        state
    }

    /// Returns the secret number.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Returns the number of counted guesses.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the lower end of the bracket.
    pub fn low(&self) -> u32 {
        self.low
    }

    /// Returns the upper end of the bracket.
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Returns the bracket as `(low, high)`.
    pub fn bracket(&self) -> (u32, u32) {
        (self.low, self.high)
    }

    /// Returns counted guesses in submission order.
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    /// Returns true once the target has been guessed.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Score of the game once won, `None` while it is still going.
    pub fn score(&self) -> Option<u32> {
        self.won.then(|| crate::clues::score(self.attempts))
    }

    /// Checks every game invariant.
    ///
    /// Useful for states that arrive from outside the engine, such as a
    /// deserialized snapshot.
    pub fn verify(&self) -> Result<(), Vec<InvariantViolation>> {
        GuessInvariants::check_all(self)
    }

    pub(crate) fn record(&mut self, guess: u32) {
        self.attempts += 1;
        self.history.push(guess);
    }

    pub(crate) fn raise_low(&mut self, low: u32) {
        self.low = self.low.max(low);
    }

    pub(crate) fn lower_high(&mut self, high: u32) {
        self.high = self.high.min(high);
    }

    pub(crate) fn mark_won(&mut self) {
        self.won = true;
    }

    /// Builds a state without any checks, for corrupting in tests.
    #[cfg(test)]
    pub(crate) fn from_parts(
        target: u32,
        attempts: u32,
        (low, high): (u32, u32),
        history: Vec<u32>,
        won: bool,
    ) -> Self {
        Self {
            target,
            attempts,
            low,
            high,
            history,
            won,
        }
    }
}
