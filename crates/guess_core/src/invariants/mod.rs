//! First-class invariants for a guessing game.
//!
//! Invariants are logical properties that must hold for every state the
//! engine produces. They are checked after each counted guess in debug
//! builds and can be tested independently.

mod bracket;
mod history;
mod terminal;

pub use bracket::{BracketContainsTarget, TightBracket};
pub use history::HistoryMatchesAttempts;
pub use terminal::WonMatchesHistory;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Every guessing-game invariant as one composable set.
pub type GuessInvariants = (
    BracketContainsTarget,
    TightBracket,
    HistoryMatchesAttempts,
    WonMatchesHistory,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameEngine, GameState};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GuessInvariants::check_all(&GameState::new(1)).is_ok());
        assert!(GuessInvariants::check_all(&GameState::new(100)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_guesses() {
        let engine = GameEngine::default();
        let mut state = GameState::new(63);
        for raw in ["50", "75", "62", "70", "63"] {
            state = engine.evaluate(state, Some(raw)).into_parts().0;
        }
        assert!(GuessInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        // Bracket excludes the target and history disagrees with attempts.
        let state = GameState::from_parts(50, 3, (60, 100), vec![59], false);
        let violations = GuessInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&InvariantViolation::new(BracketContainsTarget::description())));
        assert!(violations.contains(&InvariantViolation::new(TightBracket::description())));
        assert!(violations.contains(&InvariantViolation::new(HistoryMatchesAttempts::description())));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (BracketContainsTarget, HistoryMatchesAttempts);
        assert!(TwoInvariants::check_all(&GameState::new(5)).is_ok());
    }

    #[test]
    fn test_violation_displays_description() {
        let violation = InvariantViolation::new("low <= high");
        assert_eq!(violation.to_string(), "low <= high");
    }
}
