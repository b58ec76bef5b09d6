//! Strict parsing of raw guess text.
//!
//! A guess is one or more ASCII decimal digits, optionally surrounded by
//! whitespace. No signs, no decimal points, no lenient coercion: `"12.0"`,
//! `"-5"`, `"+5"`, `""` and `"abc"` are all rejected.

use crate::state::{MAX_GUESS, MIN_GUESS};
use tracing::{debug, instrument};

/// Why a raw guess was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GuessError {
    /// Missing, empty, or not made only of decimal digits.
    #[display("Not a whole number")]
    Invalid,

    /// A whole number outside `MIN_GUESS..=MAX_GUESS`.
    #[display("Outside {}..={}", MIN_GUESS, MAX_GUESS)]
    OutOfRange,
}

/// Returns true if `raw`, once trimmed, is made only of decimal digits.
pub fn is_whole_number(raw: &str) -> bool {
    let text = raw.trim();
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a raw guess into a playable number.
///
/// Digit strings too long for `u32` are whole numbers nonetheless, so they
/// report [`GuessError::OutOfRange`] rather than [`GuessError::Invalid`].
#[instrument]
pub fn parse_guess(raw: Option<&str>) -> Result<u32, GuessError> {
    let Some(raw) = raw else {
        debug!("No guess supplied");
        return Err(GuessError::Invalid);
    };

    if !is_whole_number(raw) {
        debug!(len = raw.len(), "Not a whole number");
        return Err(GuessError::Invalid);
    }

    let value = raw.trim().parse::<u32>().map_err(|_| {
        debug!("Whole number overflows");
        GuessError::OutOfRange
    })?;

    if !(MIN_GUESS..=MAX_GUESS).contains(&value) {
        debug!(value, "Whole number out of range");
        return Err(GuessError::OutOfRange);
    }

    Ok(value)
}
