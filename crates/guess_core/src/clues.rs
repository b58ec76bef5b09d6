//! Extra feedback beyond the bracket: how close a guess landed, clues about
//! the target on request, and the score of a won game.

use crate::state::{GameState, MAX_GUESS};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::{debug, instrument};

/// Score of a game won on the first guess.
pub const BASE_SCORE: u32 = 1000;

/// Points lost per counted guess.
pub const ATTEMPT_PENALTY: u32 = 50;

/// Score for a game won after `attempts` counted guesses, floored at zero.
pub fn score(attempts: u32) -> u32 {
    BASE_SCORE.saturating_sub(attempts.saturating_mul(ATTEMPT_PENALTY))
}

/// Distance band of a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    /// Within 5.
    #[strum(to_string = "Very hot!")]
    VeryHot,
    /// Within 10.
    #[strum(to_string = "Hot!")]
    Hot,
    /// Within 20.
    #[strum(to_string = "Warm")]
    Warm,
    /// Further away.
    #[strum(to_string = "Cold!")]
    Cold,
}

impl Temperature {
    /// Band for `guess` against `target`.
    pub fn of(guess: u32, target: u32) -> Self {
        match guess.abs_diff(target) {
            0..=5 => Self::VeryHot,
            6..=10 => Self::Hot,
            11..=20 => Self::Warm,
            _ => Self::Cold,
        }
    }
}

/// Kind of fact a clue reveals about the target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Clue {
    /// Even or odd.
    Parity,
    /// Which half of the range.
    Half,
    /// Sum of the decimal digits.
    DigitSum,
    /// Prime or not.
    Primality,
}

impl Clue {
    const ROTATION: [Clue; 4] = [Clue::Parity, Clue::Half, Clue::DigitSum, Clue::Primality];

    /// Clue offered after `attempts` counted guesses; a new one per guess.
    pub fn rotation(attempts: u32) -> Self {
        let index = attempts.saturating_sub(1) as usize % Self::ROTATION.len();
        Self::ROTATION[index]
    }

    /// States this clue about `target`.
    pub fn reveal(self, target: u32) -> String {
        let midpoint = MAX_GUESS / 2;
        let fact = match self {
            Clue::Parity if target % 2 == 0 => "The number is even".to_string(),
            Clue::Parity => "The number is odd".to_string(),
            Clue::Half if target > midpoint => format!("The number is greater than {midpoint}"),
            Clue::Half => format!("The number is {midpoint} or less"),
            Clue::DigitSum => format!("The sum of its digits is {}", digit_sum(target)),
            Clue::Primality if is_prime(target) => "The number is prime".to_string(),
            Clue::Primality => "The number is not prime".to_string(),
        };
        format!("Hint: {fact}.")
    }
}

/// Why no clue can be given yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ClueUnavailable {
    /// Clues are earned by guessing first.
    #[display("Make at least one guess first!")]
    NoGuesses,
    /// The game is over.
    #[display("You already won! Start a new game to play again.")]
    AlreadyWon,
}

/// A clue about the target of an ongoing game.
///
/// `kind` picks the clue; without it the clue rotates with the attempt
/// count. Never changes the game.
#[instrument(skip(state), fields(attempts = state.attempts(), won = state.won()))]
pub fn clue_for(state: &GameState, kind: Option<Clue>) -> Result<String, ClueUnavailable> {
    if state.won() {
        return Err(ClueUnavailable::AlreadyWon);
    }
    if state.attempts() == 0 {
        return Err(ClueUnavailable::NoGuesses);
    }
    let clue = kind.unwrap_or_else(|| Clue::rotation(state.attempts()));
    debug!(%clue, "Revealing clue");
    Ok(clue.reveal(state.target()))
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

fn is_prime(n: u32) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}
