//! Number guessing game logic.
//!
//! This crate owns everything about a single player's game and nothing
//! about how that game reaches the player.
//!
//! # Architecture
//!
//! - **State**: [`GameState`], the per-session record (target, attempts,
//!   bracket, history, won flag)
//! - **Engine**: [`GameEngine`], stateless evaluation of a raw guess
//!   against a state
//! - **Targets**: [`TargetSource`] implementations that pick the secret
//! - **Invariants**: first-class checks over a [`GameState`]
//! - **Clues**: temperature bands, on-demand [`Clue`]s and the win score
//!
//! # Example
//!
//! ```
//! use guess_core::{FixedTarget, GameEngine, GameState, Outcome};
//!
//! let engine = GameEngine::default();
//! let mut targets = FixedTarget::new(50).unwrap();
//! let state = GameState::fresh(&mut targets);
//!
//! let eval = engine.evaluate(state, Some("25"));
//! assert_eq!(eval.outcome(), Outcome::TooLow);
//! assert_eq!(eval.state().bracket(), (26, 100));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clues;
mod engine;
pub mod invariants;
mod outcome;
mod parse;
mod state;
mod target;

pub use clues::{
    ATTEMPT_PENALTY, BASE_SCORE, Clue, ClueUnavailable, Temperature, clue_for, score,
};
pub use engine::{Evaluation, GameEngine};
pub use invariants::{GuessInvariants, Invariant, InvariantSet, InvariantViolation};
pub use outcome::{MessageStyle, Messages, Outcome};
pub use parse::{GuessError, is_whole_number, parse_guess};
pub use state::{GameState, MAX_GUESS, MIN_GUESS};
pub use target::{FixedTarget, RandomTarget, ScriptedTargets, TargetOutOfRange, TargetSource};
