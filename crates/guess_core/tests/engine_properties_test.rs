//! Whole-game properties of the guessing engine.

use guess_core::{
    FixedTarget, GameEngine, GameState, GuessInvariants, InvariantSet, MAX_GUESS, MIN_GUESS,
    Outcome, RandomTarget, TargetSource,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fixed(target: u32) -> GameState {
    GameState::fresh(&mut FixedTarget::new(target).expect("target in range"))
}

#[test]
fn test_classification_matches_comparison() {
    let engine = GameEngine::default();
    for target in MIN_GUESS..=MAX_GUESS {
        for guess in MIN_GUESS..=MAX_GUESS {
            let eval = engine.evaluate(fixed(target), Some(&guess.to_string()));
            let expected = match guess.cmp(&target) {
                std::cmp::Ordering::Less => Outcome::TooLow,
                std::cmp::Ordering::Greater => Outcome::TooHigh,
                std::cmp::Ordering::Equal => Outcome::Won,
            };
            assert_eq!(eval.outcome(), expected, "target {target} guess {guess}");
        }
    }
}

#[test]
fn test_invariants_hold_over_random_play() {
    let engine = GameEngine::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut targets = RandomTarget::seeded(17);
    let inputs = ["", "abc", "-3", "0", "101", "7.5", " 42 "];

    for _ in 0..500 {
        let mut state = GameState::fresh(&mut targets);
        let mut counted = Vec::new();

        for _ in 0..40 {
            let raw = if rng.random_bool(0.2) {
                inputs[rng.random_range(0..inputs.len())].to_string()
            } else {
                rng.random_range(MIN_GUESS..=MAX_GUESS).to_string()
            };

            let before = state.clone();
            let eval = engine.evaluate(state, Some(&raw));
            let (after, outcome, _) = eval.into_parts();

            assert!(
                GuessInvariants::check_all(&after).is_ok(),
                "invariants broken after {raw:?}: {after:?}"
            );
            assert!(after.low() <= after.target() && after.target() <= after.high());

            if outcome.is_counted() {
                counted.push(raw.trim().parse::<u32>().expect("counted guess is numeric"));
            } else {
                assert_eq!(after, before, "{outcome} must not mutate state");
            }

            assert_eq!(after.attempts() as usize, counted.len());
            assert_eq!(after.history(), counted.as_slice());
            state = after;
        }
    }
}

#[test]
fn test_binary_search_always_wins_within_seven() {
    let engine = GameEngine::default();
    for target in MIN_GUESS..=MAX_GUESS {
        let mut state = fixed(target);
        loop {
            let midpoint = (state.low() + state.high()) / 2;
            let (next, outcome, _) = engine.evaluate(state, Some(&midpoint.to_string())).into_parts();
            state = next;
            if outcome == Outcome::Won {
                break;
            }
            assert!(state.attempts() < 7, "target {target} not found in 7");
        }
        assert!(state.won());
        assert!(state.attempts() <= 7);
    }
}

#[test]
fn test_won_state_is_terminal() {
    let engine = GameEngine::default();
    let (won, outcome, _) = engine.evaluate(fixed(64), Some("64")).into_parts();
    assert_eq!(outcome, Outcome::Won);

    for guess in MIN_GUESS..=MAX_GUESS {
        let eval = engine.evaluate(won.clone(), Some(&guess.to_string()));
        assert_eq!(eval.outcome(), Outcome::AlreadyWon);
        assert_eq!(eval.state(), &won);
        assert_eq!(
            eval.message(),
            "You already won! Start a new game to play again."
        );
    }
}

#[test]
fn test_new_game_after_win_is_blank() {
    let engine = GameEngine::default();
    let mut targets = RandomTarget::seeded(3);
    let state = GameState::fresh(&mut targets);
    let target = state.target();
    let (won, _, _) = engine.evaluate(state, Some(&target.to_string())).into_parts();
    assert!(won.won());

    let (fresh, outcome, _) = engine.new_game(&mut targets).into_parts();
    assert_eq!(outcome, Outcome::NewGame);
    assert_eq!(fresh.attempts(), 0);
    assert_eq!(fresh.bracket(), (1, 100));
    assert!(fresh.history().is_empty());
    assert!(!fresh.won());
}

#[test]
fn test_reset_targets_are_roughly_uniform() {
    let engine = GameEngine::default();
    let mut targets = RandomTarget::seeded(11);
    let mut below_half = 0;
    let mut seen = [false; MAX_GUESS as usize + 1];
    let resets = 20_000;

    for _ in 0..resets {
        let target = engine.new_game(&mut targets).state().target();
        seen[target as usize] = true;
        if target <= 50 {
            below_half += 1;
        }
    }

    assert!(seen[1..].iter().all(|&s| s), "some target never drawn");
    // Half of 20000 is 10000; a fair draw stays within a few hundred.
    assert!((9_500..=10_500).contains(&below_half), "{below_half} of {resets} at or below 50");
}

#[test]
fn test_scenarios_with_pinned_target() {
    let engine = GameEngine::default();

    let eval = engine.evaluate(fixed(50), Some("25"));
    assert_eq!(eval.outcome(), Outcome::TooLow);
    assert_eq!(eval.state().low(), 26);
    assert_eq!(eval.state().attempts(), 1);

    let eval = engine.evaluate(fixed(50), Some("75"));
    assert_eq!(eval.outcome(), Outcome::TooHigh);
    assert_eq!(eval.state().high(), 74);
    assert_eq!(eval.state().attempts(), 1);

    let eval = engine.evaluate(fixed(50), Some("50"));
    assert_eq!(eval.outcome(), Outcome::Won);
    assert_eq!(eval.state().attempts(), 1);
    assert!(eval.state().won());

    let eval = engine.evaluate(fixed(50), Some("abc"));
    assert_eq!(eval.outcome(), Outcome::Invalid);
    assert_eq!(eval.state(), &fixed(50));

    let eval = engine.evaluate(fixed(50), Some("150"));
    assert_eq!(eval.outcome(), Outcome::OutOfRange);
    assert_eq!(eval.state(), &fixed(50));
}

#[test]
fn test_custom_source_via_trait_object() {
    struct Countdown(u32);
    impl TargetSource for Countdown {
        fn next_target(&mut self) -> u32 {
            self.0 -= 1;
            self.0
        }
    }

    let mut source: Box<dyn TargetSource> = Box::new(Countdown(11));
    let engine = GameEngine::default();
    assert_eq!(engine.new_game(&mut source).state().target(), 10);
    assert_eq!(engine.new_game(&mut source).state().target(), 9);
}
