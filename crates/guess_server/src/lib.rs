//! Number guessing game over HTTP.
//!
//! Wraps [`guess_core`] with everything needed to play it from a browser
//! or a script.
//!
//! # Architecture
//!
//! - **Store**: [`SessionStore`] maps a session to its game; the in-memory
//!   implementation serialises updates per session and expires idle games
//! - **Service**: [`GameService`] runs one atomic read-evaluate-write per
//!   request
//! - **Routes**: axum handlers for `/`, `/guess`, `/new`, `/state`, `/health`
//! - **Config**: TOML file, `GUESS_*` environment, CLI flags
//!
//! # Example
//!
//! ```no_run
//! use guess_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load("guess_server.toml")?;
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod params;
pub mod render;
mod routes;
mod server;
mod service;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, RenderMode, ServerConfig};

// Crate-level exports - Request handling
pub use params::{GUESS_KEYS, GuessParams};
pub use routes::{AppState, FEEDBACK_HEADER, OUTCOME_HEADER, router};
pub use server::{serve, spawn_purger};

// Crate-level exports - Game sessions
pub use service::{GameService, Snapshot, Turn};
pub use session::{ClientSession, SESSION_COOKIE, SessionId};
pub use store::{MemorySessionStore, SessionStore};
