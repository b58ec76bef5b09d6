//! History invariant: one history entry per counted attempt.

use super::Invariant;
use crate::state::{GameState, MAX_GUESS, MIN_GUESS};

/// Invariant: history length equals `attempts` and every entry is playable.
///
/// Rejected input never reaches the history, so nothing outside the range
/// may appear there.
pub struct HistoryMatchesAttempts;

impl Invariant<GameState> for HistoryMatchesAttempts {
    fn holds(state: &GameState) -> bool {
        state.history().len() == state.attempts() as usize
            && state
                .history()
                .iter()
                .all(|g| (MIN_GUESS..=MAX_GUESS).contains(g))
    }

    fn description() -> &'static str {
        "History holds exactly one playable guess per attempt"
    }
}
