//! Command-line interface for guess_server.

use clap::{Parser, Subcommand};

/// Number guessing game server
#[derive(Parser, Debug)]
#[command(name = "guess_server")]
#[command(about = "Session-scoped number guessing game over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to the TOML config file (defaults apply if it is missing)
        #[arg(short, long, default_value = "guess_server.toml")]
        config: std::path::PathBuf,

        /// Host to bind to, overriding config and environment
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding config and environment
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed for target generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a scripted game offline and print each response
    Play {
        /// Secret number
        #[arg(short, long)]
        target: u32,

        /// Use bare feedback ("Too low", "Correct", ...)
        #[arg(long)]
        plain: bool,

        /// End too-low/too-high feedback with a hot/cold band
        #[arg(long)]
        temperature: bool,

        /// Guesses to submit, in order
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        guesses: Vec<String>,
    },
}
