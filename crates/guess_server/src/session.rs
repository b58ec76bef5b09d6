//! Session identity carried in a cookie.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "guess_session";

/// Unique identifier for a player's session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
pub struct SessionId(String);

impl SessionId {
    /// Issues a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts `raw` only if it is a well-formed UUID.
    ///
    /// The id is normalised to lowercase hyphenated form.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .map(|uuid| Self(uuid.hyphenated().to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value that binds the client to this session.
    pub fn set_cookie(&self) -> HeaderValue {
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0);
        // Hyphenated UUIDs and the fixed attributes are plain ASCII.
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// The calling client's session, read from its cookie or newly issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession {
    id: SessionId,
    issued: bool,
}

impl ClientSession {
    /// Finds the session cookie in `headers`, issuing a new id when it is
    /// missing or malformed.
    #[instrument(skip_all)]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| SessionId::parse(value));

        match existing {
            Some(id) => Self { id, issued: false },
            None => {
                let id = SessionId::generate();
                debug!(session_id = %id, "Issued new session");
                Self { id, issued: true }
            }
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// True if the id was created for this request and must be sent back.
    pub fn issued(&self) -> bool {
        self.issued
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
