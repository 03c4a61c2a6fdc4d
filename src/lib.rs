//! Connect Four client library - server-authoritative game state on the client
//!
//! The rules engine lives on a remote server. This crate mirrors the state it
//! confirms, renders it as a grid and submits moves.
//!
//! # Architecture
//!
//! - **Game**: wire types for the session document and the coordinate mapper
//! - **Store**: actions, the pure reducer and the application-owned store
//! - **Gateway**: HTTP client for the game API
//! - **Dispatcher**: single-flight request → response → action orchestration
//! - **Screen**: screen routing from the projection
//! - **TUI**: ratatui front end
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use connect_four_client::{GameStore, HttpGateway, MoveDispatcher, PlayerInfo};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gateway = HttpGateway::new("http://localhost:4000/", Duration::from_secs(10))?;
//! let store = GameStore::new();
//! let dispatcher = MoveDispatcher::new(gateway, store.clone());
//!
//! dispatcher
//!     .create_game(PlayerInfo::new("Ada".into(), "Grace".into()), None)
//!     .await?;
//! dispatcher.submit_current(4).await?;
//! println!("{:?}", store.snapshot().phase());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod dispatcher;
mod game;
mod gateway;
mod screen;
mod setup;
mod store;
mod tui;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Game types
pub use game::{
    Board, Cell, Difficulty, GameId, GameState, GridRow, LastPlay, Occupant, Outcome, PlayerInfo,
    PlayerSlot, StateViolation, classify, render_rows,
};

// Crate-level exports - Store
pub use store::{
    Action, GameProjection, GameStatePatch, GameStore, SET_GAME_STATE, SessionPhase,
    UPDATE_STATE, reduce, set_game_state, update_state,
};

// Crate-level exports - Gateway
pub use gateway::{ApiRoutes, GameGateway, GatewayError, GatewayErrorKind, HttpGateway};

// Crate-level exports - Dispatcher
pub use dispatcher::{DispatchError, DispatchFailure, DispatchStatus, MoveDispatcher, RequestKind};

// Crate-level exports - Screens and setup forms
pub use screen::{Screen, follow, rematch, resolve};
pub use setup::{CPU_NAME, FieldError, FormErrors, FormField, NewGameRequest, two_player, versus_cpu};

// Crate-level exports - TUI
pub use tui::{format_board, run_tui};
