//! Connect Four - terminal client
//!
//! Plays against a remote, server-authoritative Connect Four engine.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use connect_four_client::{
    Cli, ClientConfig, Command, GameId, GameStore, HttpGateway, MoveDispatcher, format_board,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::load_or_default(&cli.config)?;
    if let Some(server_url) = cli.server_url {
        config = config.with_server_url(server_url);
    }

    match cli.command {
        Command::Tui => connect_four_client::run_tui(config).await,
        Command::Show { game_id } => show_game(config, game_id).await,
    }
}

/// Fetch a game and print it
#[instrument(skip(config))]
async fn show_game(config: ClientConfig, game_id: String) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway = HttpGateway::new(config.server_url(), config.request_timeout())?;
    let store = GameStore::new();
    let dispatcher = MoveDispatcher::new(gateway, store.clone());

    let game_id = GameId::from(game_id.as_str());
    info!(%game_id, "Fetching game");
    dispatcher.refresh(&game_id).await?;

    let projection = store.snapshot();
    println!("{}", format_board(&projection));
    match projection.result_text() {
        Some(result) => println!("{}", result),
        None => {
            if let Some(player) = projection.current_player {
                println!("{}'s turn", projection.name_of(player));
            }
        }
    }
    Ok(())
}
