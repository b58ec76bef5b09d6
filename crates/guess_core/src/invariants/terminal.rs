//! Terminal invariant: the won flag agrees with the history.

use super::Invariant;
use crate::state::GameState;

/// Invariant: a game is won exactly when its last guess hit the target.
///
/// Guessing stops counting once the game is won, so the target appears in
/// the history at most once and only in the final position.
pub struct WonMatchesHistory;

impl Invariant<GameState> for WonMatchesHistory {
    fn holds(state: &GameState) -> bool {
        let hits = state
            .history()
            .iter()
            .filter(|&&g| g == state.target())
            .count();
        let last_hit = state.history().last() == Some(&state.target());

        if state.won() {
            hits == 1 && last_hit
        } else {
            hits == 0
        }
    }

    fn description() -> &'static str {
        "Game is won exactly when the final counted guess equals the target"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_game_holds() {
        let state = GameState::from_parts(30, 1, (1, 39), vec![40], false);
        assert!(WonMatchesHistory::holds(&state));
    }

    #[test]
    fn test_won_game_holds() {
        let state = GameState::from_parts(30, 2, (1, 39), vec![40, 30], true);
        assert!(WonMatchesHistory::holds(&state));
    }

    #[test]
    fn test_won_without_hit_violates() {
        let state = GameState::from_parts(30, 1, (1, 39), vec![40], true);
        assert!(!WonMatchesHistory::holds(&state));
    }

    #[test]
    fn test_hit_without_won_violates() {
        let state = GameState::from_parts(30, 1, (1, 100), vec![30], false);
        assert!(!WonMatchesHistory::holds(&state));
    }

    #[test]
    fn test_guess_after_hit_violates() {
        let state = GameState::from_parts(30, 2, (1, 100), vec![30, 50], true);
        assert!(!WonMatchesHistory::holds(&state));
    }
}
