//! Guess Server - CLI entry point

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use guess_core::{FixedTarget, GameEngine, GameState, MessageStyle, Messages};
use guess_server::ServerConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            seed,
        } => run_server(config, host, port, seed).await,
        Command::Play {
            target,
            plain,
            temperature,
            guesses,
        } => play(target, plain, temperature, &guesses),
    }
}

/// Run the HTTP game server
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(
    config_path: std::path::PathBuf,
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = ServerConfig::load(&config_path)?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(seed) = seed {
        config = config.with_seed(Some(seed));
    }
    config.validate()?;

    info!(host = %config.host(), port = config.port(), "Starting guess server");
    guess_server::serve(config).await
}

/// Evaluate a scripted sequence of guesses against a fixed target
fn play(target: u32, plain: bool, temperature: bool, guesses: &[String]) -> Result<()> {
    let style = if plain {
        MessageStyle::Plain
    } else {
        MessageStyle::Detailed
    };
    let engine = GameEngine::new(Messages::new(style, true).with_temperature(temperature));
    let mut state = GameState::fresh(&mut FixedTarget::new(target)?);

    for raw in guesses {
        let (next, outcome, message) = engine.evaluate(state, Some(raw)).into_parts();
        println!("{raw:>6} -> {outcome}: {message}");
        state = next;
    }

    println!(
        "attempts={} bracket={}..={} won={} score={}",
        state.attempts(),
        state.low(),
        state.high(),
        state.won(),
        state.score().unwrap_or_default()
    );
    Ok(())
}
