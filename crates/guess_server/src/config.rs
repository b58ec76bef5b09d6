//! Server configuration.
//!
//! Values come from three layers, later ones winning: a TOML file, then
//! `GUESS_*` environment variables (a `.env` file is loaded first by the
//! binary), then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use guess_core::{
    FixedTarget, MAX_GUESS, MIN_GUESS, MessageStyle, Messages, RandomTarget, TargetSource,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How responses to guesses are rendered by default.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RenderMode {
    /// A full HTML page.
    #[default]
    Html,
    /// The bare feedback message.
    Text,
}

/// Configuration for the guessing game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Detailed sentences or bare one-word feedback.
    #[serde(default)]
    message_style: MessageStyle,

    /// Whether too-low/too-high feedback includes the bracket.
    #[serde(default = "default_bracket_hints")]
    bracket_hints: bool,

    /// Whether too-low/too-high feedback ends with a hot/cold band.
    #[serde(default)]
    temperature_hints: bool,

    /// Default rendering for guess responses.
    #[serde(default)]
    render: RenderMode,

    /// Idle time after which a session's game is forgotten.
    #[serde(default = "default_session_ttl_secs")]
    session_ttl_secs: u64,

    /// How often expired sessions are swept.
    #[serde(default = "default_purge_interval_secs")]
    purge_interval_secs: u64,

    /// Seed for target generation; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Pins every game to one target. Meant for demos and smoke tests.
    #[serde(default)]
    fixed_target: Option<u32>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_bracket_hints() -> bool {
    true
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            message_style: MessageStyle::default(),
            bracket_hints: default_bracket_hints(),
            temperature_hints: false,
            render: RenderMode::default(),
            session_ttl_secs: default_session_ttl_secs(),
            purge_interval_secs: default_purge_interval_secs(),
            seed: None,
            fixed_target: None,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, falls back to defaults otherwise, then
    /// applies environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path.as_ref())?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `GUESS_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `GUESS_*` overrides from `lookup`.
    ///
    /// Recognised keys: `GUESS_HOST`, `GUESS_PORT`, `GUESS_SEED`,
    /// `GUESS_RENDER`, `GUESS_FIXED_TARGET`.
    #[instrument(skip_all)]
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("GUESS_HOST") {
            debug!(%host, "Host overridden from environment");
            self.host = host;
        }
        if let Some(port) = lookup("GUESS_PORT") {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid GUESS_PORT `{}`: {}", port, e)))?;
        }
        if let Some(seed) = lookup("GUESS_SEED") {
            let seed = seed
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid GUESS_SEED `{}`: {}", seed, e)))?;
            self.seed = Some(seed);
        }
        if let Some(render) = lookup("GUESS_RENDER") {
            self.render = render.parse().map_err(|e| {
                ConfigError::new(format!("Invalid GUESS_RENDER `{}`: {}", render, e))
            })?;
        }
        if let Some(target) = lookup("GUESS_FIXED_TARGET") {
            let target = target.parse().map_err(|e| {
                ConfigError::new(format!("Invalid GUESS_FIXED_TARGET `{}`: {}", target, e))
            })?;
            self.fixed_target = Some(target);
        }
        self.validate()
    }

    /// Rejects values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(target) = self.fixed_target {
            if !(MIN_GUESS..=MAX_GUESS).contains(&target) {
                return Err(ConfigError::new(format!(
                    "fixed_target {} outside {}..={}",
                    target, MIN_GUESS, MAX_GUESS
                )));
            }
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::new("session_ttl_secs must be positive".to_string()));
        }
        if self.purge_interval_secs == 0 {
            return Err(ConfigError::new(
                "purge_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Message settings for the engine.
    pub fn messages(&self) -> Messages {
        Messages::new(self.message_style, self.bracket_hints)
            .with_temperature(self.temperature_hints)
    }

    /// Target source described by this configuration.
    ///
    /// A fixed target wins over a seed; without either, targets come from
    /// entropy.
    pub fn target_source(&self) -> Result<Box<dyn TargetSource + Send>, ConfigError> {
        match (self.fixed_target, self.seed) {
            (Some(target), _) => {
                let fixed = FixedTarget::new(target)
                    .map_err(|e| ConfigError::new(format!("Invalid fixed target: {}", e)))?;
                Ok(Box::new(fixed))
            }
            (None, Some(seed)) => Ok(Box::new(RandomTarget::seeded(seed))),
            (None, None) => Ok(Box::new(RandomTarget::from_entropy())),
        }
    }

    /// Idle lifetime of a session.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Interval between expiry sweeps.
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
