//! Stateless evaluation of guesses.
//!
//! The engine is the only code that mutates a [`GameState`]. Each call
//! takes the current state by value and hands back the next one together
//! with its [`Outcome`] and feedback text.
//!
//! ```text
//!   raw text ──parse──▶ Invalid | OutOfRange        (state untouched)
//!                 │
//!                 ▼
//!             won? ──yes──▶ AlreadyWon              (state untouched)
//!                 │
//!                 no
//!                 ▼
//!   attempts += 1, history.push(guess)
//!     guess < target  → low  = max(low, guess + 1)   TooLow
//!     guess > target  → high = min(high, guess - 1)  TooHigh
//!     guess = target  → won = true                   Won
//! ```

use crate::invariants::{GuessInvariants, InvariantSet};
use crate::outcome::{Messages, Outcome};
use crate::parse::{GuessError, parse_guess};
use crate::state::GameState;
use crate::target::TargetSource;
use derive_new::new;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// Result of one engine call.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Evaluation {
    state: GameState,
    outcome: Outcome,
    message: String,
}

impl Evaluation {
    /// Returns the state after the call.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the outcome kind.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the feedback text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Splits into state, outcome and message.
    pub fn into_parts(self) -> (GameState, Outcome, String) {
        (self.state, self.outcome, self.message)
    }
}

/// Evaluates guesses and starts games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct GameEngine {
    messages: Messages,
}

impl GameEngine {
    /// Returns the message settings.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Evaluates `raw` against `state`.
    ///
    /// Never fails: malformed, out-of-range and post-win input each map to
    /// their own outcome and leave the state exactly as it was.
    #[instrument(skip(self, state), fields(attempts = state.attempts(), won = state.won()))]
    pub fn evaluate(&self, mut state: GameState, raw: Option<&str>) -> Evaluation {
        let outcome = match parse_guess(raw) {
            Err(GuessError::Invalid) => Outcome::Invalid,
            Err(GuessError::OutOfRange) => Outcome::OutOfRange,
            Ok(guess) if state.won() => {
                debug!(guess, "Guess after win ignored");
                Outcome::AlreadyWon
            }
            Ok(guess) => Self::compare(&mut state, guess),
        };

        let message = self.messages.describe(outcome, &state);
        debug!(%outcome, %message, "Evaluated guess");
        Evaluation::new(state, outcome, message)
    }

    /// Starts a fresh game with a target from `source`.
    #[instrument(skip_all)]
    pub fn new_game<T: TargetSource + ?Sized>(&self, source: &mut T) -> Evaluation {
        let state = GameState::fresh(source);
        let message = self.messages.describe(Outcome::NewGame, &state);
        info!("New game started");
        Evaluation::new(state, Outcome::NewGame, message)
    }

    fn compare(state: &mut GameState, guess: u32) -> Outcome {
        state.record(guess);

        let outcome = match guess.cmp(&state.target()) {
            Ordering::Less => {
                state.raise_low(guess + 1);
                Outcome::TooLow
            }
            Ordering::Greater => {
                state.lower_high(guess - 1);
                Outcome::TooHigh
            }
            Ordering::Equal => {
                state.mark_won();
                Outcome::Won
            }
        };

        info!(
            guess,
            attempts = state.attempts(),
            low = state.low(),
            high = state.high(),
            %outcome,
            "Counted guess"
        );
        Self::verify(state);
        outcome
    }

    /// Panics in debug builds if the engine broke an invariant.
    fn verify(state: &GameState) {
        if cfg!(debug_assertions) {
            if let Err(violations) = GuessInvariants::check_all(state) {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(%descriptions, "Invariant violated");
                panic!("game invariant violated: {descriptions}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedTarget;

    fn game(target: u32) -> GameState {
        GameState::new(target)
    }

    #[test]
    fn test_too_low_raises_low() {
        let eval = GameEngine::default().evaluate(game(50), Some("25"));
        assert_eq!(eval.outcome(), Outcome::TooLow);
        assert_eq!(eval.state().low(), 26);
        assert_eq!(eval.state().high(), 100);
        assert_eq!(eval.state().attempts(), 1);
        assert_eq!(eval.state().history(), &[25]);
    }

    #[test]
    fn test_too_high_lowers_high() {
        let eval = GameEngine::default().evaluate(game(50), Some("75"));
        assert_eq!(eval.outcome(), Outcome::TooHigh);
        assert_eq!(eval.state().high(), 74);
        assert_eq!(eval.state().attempts(), 1);
    }

    #[test]
    fn test_correct_wins() {
        let eval = GameEngine::default().evaluate(game(50), Some("50"));
        assert_eq!(eval.outcome(), Outcome::Won);
        assert!(eval.state().won());
        assert_eq!(eval.state().attempts(), 1);
        assert_eq!(eval.message(), "Bang on! 50 it is. Nailed it in 1 attempt.");
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let engine = GameEngine::default();
        let start = engine.evaluate(game(50), Some("30")).into_parts().0;
        for (raw, expected) in [
            (Some("abc"), Outcome::Invalid),
            (Some(""), Outcome::Invalid),
            (None, Outcome::Invalid),
            (Some("12.0"), Outcome::Invalid),
            (Some("-5"), Outcome::Invalid),
            (Some("150"), Outcome::OutOfRange),
            (Some("0"), Outcome::OutOfRange),
        ] {
            let eval = engine.evaluate(start.clone(), raw);
            assert_eq!(eval.outcome(), expected, "input {raw:?}");
            assert_eq!(eval.state(), &start, "input {raw:?}");
        }
    }

    #[test]
    fn test_already_won_is_sticky() {
        let engine = GameEngine::default();
        let won = engine.evaluate(game(50), Some("50")).into_parts().0;
        let eval = engine.evaluate(won.clone(), Some("10"));
        assert_eq!(eval.outcome(), Outcome::AlreadyWon);
        assert_eq!(eval.state(), &won);
    }

    #[test]
    fn test_rejection_after_win_is_still_rejection() {
        let engine = GameEngine::default();
        let won = engine.evaluate(game(50), Some("50")).into_parts().0;
        assert_eq!(engine.evaluate(won, Some("nope")).outcome(), Outcome::Invalid);
    }

    #[test]
    fn test_guess_outside_bracket_does_not_widen() {
        let engine = GameEngine::default();
        let state = engine.evaluate(game(50), Some("40")).into_parts().0;
        let eval = engine.evaluate(state, Some("10"));
        assert_eq!(eval.outcome(), Outcome::TooLow);
        assert_eq!(eval.state().low(), 41);
        assert_eq!(eval.state().attempts(), 2);
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut source = FixedTarget::new(77).unwrap();
        let eval = GameEngine::default().new_game(&mut source);
        assert_eq!(eval.outcome(), Outcome::NewGame);
        assert_eq!(eval.state(), &GameState::new(77));
        assert_eq!(
            eval.message(),
            "New game started. Guess a number between 1 and 100!"
        );
    }

    #[test]
    #[should_panic(expected = "game invariant violated")]
    #[cfg(debug_assertions)]
    fn test_verify_panics_on_corruption() {
        let corrupt = GameState::from_parts(50, 1, (60, 100), vec![59], false);
        GameEngine::verify(&corrupt);
    }
}
