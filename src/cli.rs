//! Command-line interface for connect_four.

use clap::{Parser, Subcommand};

/// Connect Four - terminal client for a server-hosted game
#[derive(Parser, Debug)]
#[command(name = "connect_four")]
#[command(about = "Play Connect Four against a friend or the CPU", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client configuration file
    #[arg(short, long, global = true, default_value = "connect_four.toml")]
    pub config: std::path::PathBuf,

    /// Game server URL; overrides the configuration file
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Tui,

    /// Fetch a game from the server and print its board
    Show {
        /// Session identifier
        game_id: String,
    },
}
