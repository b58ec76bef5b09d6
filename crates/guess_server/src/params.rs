//! Extracting the guess and commands from request parameters.
//!
//! Clients disagree on what to call the guess field, so the lookup tries a
//! list of common names before falling back to any parameter at all.

use crate::config::RenderMode;
use guess_core::is_whole_number;
use tracing::{debug, instrument};

/// Parameter names checked for the guess, in priority order.
pub const GUESS_KEYS: [&str; 6] = ["number", "guess", "value", "g", "input", "n"];

const NEW_GAME_KEYS: [&str; 2] = ["new", "reset"];
const FORMAT_KEY: &str = "format";

/// What a request asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessParams {
    guess: Option<String>,
    new_game: bool,
    format: Option<RenderMode>,
}

impl GuessParams {
    /// Interprets request parameters given in request order.
    ///
    /// The guess is picked in this order:
    /// 1. the first of [`GUESS_KEYS`] whose value is a whole number,
    /// 2. any other parameter whose value is a whole number,
    /// 3. the first of [`GUESS_KEYS`] present at all,
    /// 4. the first other parameter.
    ///
    /// `new`/`reset` with a truthy value (or no value) request a new game.
    /// `format=text|html` picks the rendering.
    #[instrument(skip_all, fields(count = pairs.len()))]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let new_game = pairs
            .iter()
            .any(|(key, value)| NEW_GAME_KEYS.contains(&key.as_str()) && is_truthy(value));

        let format = pairs
            .iter()
            .find(|(key, _)| key == FORMAT_KEY)
            .and_then(|(_, value)| value.parse::<RenderMode>().ok());

        let candidates: Vec<&(String, String)> = pairs
            .iter()
            .filter(|(key, _)| !is_control(key))
            .collect();

        let first_value = |key: &str| {
            candidates
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let guess = GUESS_KEYS
            .iter()
            .filter_map(|key| first_value(key))
            .find(|value| is_whole_number(value))
            .or_else(|| {
                candidates
                    .iter()
                    .map(|(_, v)| v.as_str())
                    .find(|value| is_whole_number(value))
            })
            .or_else(|| GUESS_KEYS.iter().find_map(|key| first_value(key)))
            .or_else(|| candidates.first().map(|(_, v)| v.as_str()))
            .map(str::to_string);

        debug!(?guess, new_game, ?format, "Parsed request parameters");
        Self {
            guess,
            new_game,
            format,
        }
    }

    /// Raw guess text, if any parameter supplied one.
    pub fn guess(&self) -> Option<&str> {
        self.guess.as_deref()
    }

    /// True if the request asked for a new game.
    pub fn new_game(&self) -> bool {
        self.new_game
    }

    /// Rendering requested by the client.
    pub fn format(&self) -> Option<RenderMode> {
        self.format
    }
}

fn is_control(key: &str) -> bool {
    key == FORMAT_KEY || NEW_GAME_KEYS.contains(&key)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "1" | "true" | "yes" | "on"
    )
}
