//! HTTP routes.

use crate::config::{RenderMode, ServerConfig};
use crate::params::GuessParams;
use crate::render;
use crate::service::{GameService, Snapshot, Turn};
use crate::session::ClientSession;
use crate::store::MemorySessionStore;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Query, State};
use axum::http::header::{CACHE_CONTROL, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_new::new;
use guess_core::{Clue, GameEngine, Outcome};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument};

/// Header carrying the feedback message, reduced to ASCII.
pub const FEEDBACK_HEADER: HeaderName = HeaderName::from_static("x-game-feedback");

/// Header carrying the outcome kind, e.g. `TOO_LOW`.
pub const OUTCOME_HEADER: HeaderName = HeaderName::from_static("x-game-outcome");

type Pairs = Vec<(String, String)>;

/// Shared state for every handler.
#[derive(Debug, Clone, new)]
pub struct AppState {
    service: GameService<MemorySessionStore>,
    render: RenderMode,
}

impl AppState {
    /// Builds the state a server described by `config` runs with.
    #[instrument(skip_all)]
    pub fn from_config(config: &ServerConfig) -> Result<Self, crate::ConfigError> {
        config.validate()?;
        let store = MemorySessionStore::with_ttl(config.session_ttl());
        let engine = GameEngine::new(config.messages());
        let service = GameService::with_boxed_targets(store, engine, config.target_source()?);
        info!(render = %config.render(), "Application state ready");
        Ok(Self::new(service, *config.render()))
    }

    /// Returns the game service.
    pub fn service(&self) -> &GameService<MemorySessionStore> {
        &self.service
    }

    fn respond(&self, session: &ClientSession, params: &GuessParams) -> Response {
        let turn = if params.new_game() {
            self.service.new_game(session.id())
        } else {
            self.service.guess(session.id(), params.guess())
        };
        feedback_response(session, &turn, params.format().unwrap_or(self.render))
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/guess", get(guess_query).post(guess_form))
        .route("/new", post(new_game))
        .route("/hint", get(hint))
        .route("/state", get(state_json))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index(State(app): State<AppState>, session: ClientSession) -> Response {
    let state = app.service.current(session.id());
    let message = if state.won() {
        app.service
            .engine()
            .messages()
            .describe(Outcome::AlreadyWon, &state)
    } else {
        render::greeting()
    };
    let outcome = state.won().then_some(Outcome::AlreadyWon);
    let mut response = Html(render::page(&state, &message, outcome)).into_response();
    finish(&mut response, &session);
    response
}

async fn guess_query(
    State(app): State<AppState>,
    session: ClientSession,
    Query(query): Query<Pairs>,
) -> Response {
    app.respond(&session, &GuessParams::from_pairs(&query))
}

async fn guess_form(
    State(app): State<AppState>,
    session: ClientSession,
    Query(query): Query<Pairs>,
    form: Result<Form<Pairs>, FormRejection>,
) -> Response {
    let mut pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            debug!(%rejection, "No usable form body, using query string only");
            Vec::new()
        }
    };
    pairs.extend(query);
    app.respond(&session, &GuessParams::from_pairs(&pairs))
}

async fn new_game(
    State(app): State<AppState>,
    session: ClientSession,
    Query(query): Query<Pairs>,
) -> Response {
    let format = GuessParams::from_pairs(&query)
        .format()
        .unwrap_or(app.render);
    let turn = app.service.new_game(session.id());
    feedback_response(&session, &turn, format)
}

async fn hint(
    State(app): State<AppState>,
    session: ClientSession,
    Query(query): Query<Pairs>,
) -> Response {
    let kind = query
        .iter()
        .find(|(key, _)| key == "kind")
        .and_then(|(_, value)| value.parse::<Clue>().ok());
    let format = GuessParams::from_pairs(&query)
        .format()
        .unwrap_or(app.render);

    let (status, message) = match app.service.hint(session.id(), kind) {
        Ok(clue) => (StatusCode::OK, clue),
        Err(reason) => (StatusCode::CONFLICT, reason.to_string()),
    };
    let mut response = match format {
        RenderMode::Text => message.clone().into_response(),
        RenderMode::Html => {
            let state = app.service.current(session.id());
            Html(render::page(&state, &message, None)).into_response()
        }
    };
    *response.status_mut() = status;
    if let Ok(value) = HeaderValue::from_str(&header_text(&message)) {
        response.headers_mut().insert(FEEDBACK_HEADER, value);
    }
    finish(&mut response, &session);
    response
}

async fn state_json(State(app): State<AppState>, session: ClientSession) -> Response {
    let snapshot = Snapshot::from(&app.service.current(session.id()));
    let mut response = Json(snapshot).into_response();
    finish(&mut response, &session);
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Renders `turn` with the canonical status code and feedback headers.
fn feedback_response(session: &ClientSession, turn: &Turn, mode: RenderMode) -> Response {
    let outcome = *turn.outcome();
    let mut response = match mode {
        RenderMode::Text => turn.message().to_string().into_response(),
        RenderMode::Html => Html(render::page(turn.state(), turn.message(), Some(outcome)))
            .into_response(),
    };

    *response.status_mut() = if outcome.is_rejection() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    let headers = response.headers_mut();
    headers.insert(OUTCOME_HEADER, HeaderValue::from_static(outcome.into()));
    if let Ok(value) = HeaderValue::from_str(&header_text(turn.message())) {
        headers.insert(FEEDBACK_HEADER, value);
    }

    finish(&mut response, session);
    response
}

/// ASCII rendering of `message` for the feedback header.
fn header_text(message: &str) -> String {
    message
        .chars()
        .filter_map(|c| match c {
            '\u{2013}' | '\u{2014}' => Some('-'),
            c if c.is_ascii() && !c.is_ascii_control() => Some(c),
            _ => None,
        })
        .collect()
}

fn finish(response: &mut Response, session: &ClientSession) {
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if session.issued() {
        headers.insert(SET_COOKIE, session.id().set_cookie());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_text_is_ascii() {
        assert_eq!(
            header_text("Too low! Try a higher number (26–100)."),
            "Too low! Try a higher number (26-100)."
        );
        assert_eq!(header_text("Plain text stays"), "Plain text stays");
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let zero_ttl = ServerConfig::default()
            .with_session_ttl_secs(0)
            .with_fixed_target(Some(50));
        assert!(AppState::from_config(&zero_ttl).is_err());

        let zero_purge = ServerConfig::default().with_purge_interval_secs(0);
        assert!(AppState::from_config(&zero_purge).is_err());
    }
}
