//! Bracket invariants: the window contains the target and is as narrow as
//! the feedback allows.

use super::Invariant;
use crate::state::{GameState, MAX_GUESS, MIN_GUESS};

/// Invariant: `MIN_GUESS <= low <= target <= high <= MAX_GUESS`.
pub struct BracketContainsTarget;

impl Invariant<GameState> for BracketContainsTarget {
    fn holds(state: &GameState) -> bool {
        MIN_GUESS <= state.low()
            && state.low() <= state.target()
            && state.target() <= state.high()
            && state.high() <= MAX_GUESS
    }

    fn description() -> &'static str {
        "Bracket lies within the playable range and contains the target"
    }
}

/// Invariant: the bracket is the minimal interval consistent with every
/// guess in the history.
///
/// `low` is one above the highest too-low guess and `high` is one below the
/// lowest too-high guess, falling back to the range limits.
pub struct TightBracket;

impl Invariant<GameState> for TightBracket {
    fn holds(state: &GameState) -> bool {
        let target = state.target();
        let expected_low = state
            .history()
            .iter()
            .filter(|&&g| g < target)
            .map(|&g| g + 1)
            .max()
            .unwrap_or(MIN_GUESS);
        let expected_high = state
            .history()
            .iter()
            .filter(|&&g| g > target)
            .map(|&g| g - 1)
            .min()
            .unwrap_or(MAX_GUESS);

        state.bracket() == (expected_low, expected_high)
    }

    fn description() -> &'static str {
        "Bracket is the narrowest interval consistent with the guess history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game_holds() {
        let state = GameState::new(50);
        assert!(BracketContainsTarget::holds(&state));
        assert!(TightBracket::holds(&state));
    }

    #[test]
    fn test_target_at_range_edges_holds() {
        let low_edge = GameState::from_parts(1, 1, (1, 4), vec![5], false);
        let high_edge = GameState::from_parts(100, 1, (97, 100), vec![96], false);
        assert!(BracketContainsTarget::holds(&low_edge));
        assert!(TightBracket::holds(&low_edge));
        assert!(BracketContainsTarget::holds(&high_edge));
        assert!(TightBracket::holds(&high_edge));
    }

    #[test]
    fn test_bracket_excluding_target_violates() {
        let state = GameState::from_parts(50, 0, (51, 100), vec![], false);
        assert!(!BracketContainsTarget::holds(&state));
    }

    #[test]
    fn test_inverted_bracket_violates() {
        let state = GameState::from_parts(50, 0, (70, 30), vec![], false);
        assert!(!BracketContainsTarget::holds(&state));
    }

    #[test]
    fn test_loose_bracket_violates_tightness() {
        // 40 was too low, so low must be 41.
        let state = GameState::from_parts(50, 1, (1, 100), vec![40], false);
        assert!(BracketContainsTarget::holds(&state));
        assert!(!TightBracket::holds(&state));
    }

    #[test]
    fn test_tight_after_mixed_feedback() {
        let state = GameState::from_parts(50, 4, (41, 59), vec![30, 60, 40, 80], false);
        assert!(TightBracket::holds(&state));
    }
}
