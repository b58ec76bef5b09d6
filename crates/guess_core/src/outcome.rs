//! Outcome kinds and the feedback text derived from them.

use crate::clues::Temperature;
use crate::state::{GameState, MAX_GUESS, MIN_GUESS};
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Classification of one request against a game.
///
/// Rejections are data, not errors: every input maps to exactly one
/// outcome.
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
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Missing or not a whole number.
    Invalid,
    /// A whole number outside the playable range.
    OutOfRange,
    /// Below the target.
    TooLow,
    /// Above the target.
    TooHigh,
    /// Equal to the target.
    Won,
    /// A playable guess after the game was already won.
    AlreadyWon,
    /// The game was replaced with a fresh one.
    NewGame,
}

impl Outcome {
    /// True for outcomes caused by unusable input.
    pub fn is_rejection(self) -> bool {
        matches!(self, Outcome::Invalid | Outcome::OutOfRange)
    }

    /// True for outcomes that counted as an attempt.
    pub fn is_counted(self) -> bool {
        matches!(self, Outcome::TooLow | Outcome::TooHigh | Outcome::Won)
    }
}

/// How much the feedback text says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// Full sentences, with the bracket and attempt count.
    #[default]
    Detailed,
    /// The bare words a plain-text client expects: `Too low`, `Correct`, ...
    Plain,
}

/// Maps outcomes to player-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Messages {
    style: MessageStyle,
    bracket_hints: bool,
    #[new(default)]
    temperature: bool,
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(MessageStyle::Detailed, true)
    }
}

impl Messages {
    /// Returns the configured style.
    pub fn style(&self) -> MessageStyle {
        self.style
    }

    /// Returns whether hints include the bracket.
    pub fn bracket_hints(&self) -> bool {
        self.bracket_hints
    }

    /// Enables or disables the hot/cold band after too-low/too-high hints.
    pub fn with_temperature(mut self, temperature: bool) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns whether hints carry a temperature band.
    pub fn temperature(&self) -> bool {
        self.temperature
    }

    /// Text for `outcome`, given the state after the request.
    pub fn describe(&self, outcome: Outcome, state: &GameState) -> String {
        let plain = self.style == MessageStyle::Plain;
        match outcome {
            Outcome::Invalid if plain => "Invalid input".to_string(),
            Outcome::Invalid => "Enter a valid whole number.".to_string(),
            Outcome::OutOfRange if plain => "Invalid input".to_string(),
            Outcome::OutOfRange => {
                format!("Please enter a number between {MIN_GUESS} and {MAX_GUESS}.")
            }
            Outcome::TooLow if plain => "Too low".to_string(),
            Outcome::TooLow => self.hint("Too low! Try a higher number", state),
            Outcome::TooHigh if plain => "Too high".to_string(),
            Outcome::TooHigh => self.hint("Too high! Try a lower number", state),
            Outcome::Won if plain => "Correct".to_string(),
            Outcome::Won => format!(
                "Bang on! {} it is. Nailed it in {}.",
                state.target(),
                attempts_phrase(state.attempts())
            ),
            Outcome::AlreadyWon => "You already won! Start a new game to play again.".to_string(),
            Outcome::NewGame => {
                format!("New game started. Guess a number between {MIN_GUESS} and {MAX_GUESS}!")
            }
        }
    }

    fn hint(&self, lead: &str, state: &GameState) -> String {
        let mut text = if self.bracket_hints {
            format!("{lead} ({}–{}).", state.low(), state.high())
        } else {
            format!("{lead}.")
        };
        if self.temperature {
            if let Some(&guess) = state.history().last() {
                text.push(' ');
                text.push_str(&Temperature::of(guess, state.target()).to_string());
            }
        }
        text
    }
}

fn attempts_phrase(attempts: u32) -> String {
    if attempts == 1 {
        "1 attempt".to_string()
    } else {
        format!("{attempts} attempts")
    }
}
