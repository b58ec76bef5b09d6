//! Turning game state into response bodies.
//!
//! Only numbers and the engine's fixed feedback sentences are interpolated;
//! raw client input never reaches a page.

use guess_core::{GameState, MAX_GUESS, MIN_GUESS, Outcome};

/// Greeting shown before the first guess.
pub fn greeting() -> String {
    format!("Guess a number between {MIN_GUESS} and {MAX_GUESS}!")
}

/// Full HTML page for `state` with `message` as the feedback line.
pub fn page(state: &GameState, message: &str, outcome: Option<Outcome>) -> String {
    let tone = match outcome {
        Some(Outcome::Won) => "won",
        Some(o) if o.is_rejection() => "error",
        Some(Outcome::AlreadyWon) => "info",
        Some(_) | None => "hint",
    };

    let history = if state.history().is_empty() {
        "<p class=\"muted\">No guesses yet.</p>".to_string()
    } else {
        let items: String = state
            .history()
            .iter()
            .map(|g| format!("<li>{g}</li>"))
            .collect();
        format!("<ol class=\"history\">{items}</ol>")
    };

    let status = if state.won() {
        format!(
            "Solved: the number was <strong>{}</strong>. Score: {}.",
            state.target(),
            state.score().unwrap_or_default()
        )
    } else {
        format!(
            "The number is between <strong>{}</strong> and <strong>{}</strong>.",
            state.low(),
            state.high()
        )
    };

    let guess_form = if state.won() {
        String::new()
    } else {
        format!(
            r#"<form method="post" action="/guess">
      <input type="number" name="guess" min="{MIN_GUESS}" max="{MAX_GUESS}" autofocus required>
      <button type="submit">Guess</button>
    </form>
    <form method="get" action="/hint">
      <button type="submit">Hint</button>
    </form>"#
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Guess the Number</title>
  <style>
    body {{ font-family: sans-serif; max-width: 32rem; margin: 3rem auto; }}
    .message {{ padding: 0.75rem; border-radius: 4px; }}
    .hint {{ background: #eef; }}
    .won {{ background: #efe; }}
    .error {{ background: #fee; }}
    .info {{ background: #ffe; }}
    .muted {{ color: #777; }}
  </style>
</head>
<body>
  <h1>Guess the Number</h1>
  <p class="message {tone}" id="message">{message}</p>
  <p id="status">{status}</p>
  <p id="attempts">Attempts: {attempts}</p>
  {guess_form}
  <form method="post" action="/new">
    <button type="submit">New game</button>
  </form>
  <h2>History</h2>
  {history}
</body>
</html>
"#,
        attempts = state.attempts(),
    )
}
