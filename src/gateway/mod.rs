//! Client side of the remote game API.

mod error;
mod http;
mod routes;

pub use error::{GatewayError, GatewayErrorKind};
pub use http::HttpGateway;
pub use routes::ApiRoutes;

use crate::game::{Difficulty, GameId, GameState};

/// Remote rules engine.
///
/// Every call returns the full, validated state document of the session.
#[async_trait::async_trait]
pub trait GameGateway: Send + Sync {
    /// Creates a session, against the CPU when `difficulty` is given.
    async fn create_game(&self, difficulty: Option<&Difficulty>) -> Result<GameState, GatewayError>;

    /// Drops a disc for the current player into `column`.
    async fn submit_move(&self, id: &GameId, column: u32) -> Result<GameState, GatewayError>;

    /// Clears the board of an existing session.
    async fn reset_game(&self, id: &GameId) -> Result<GameState, GatewayError>;

    /// Fetches the current state of a session.
    async fn fetch_state(&self, id: &GameId) -> Result<GameState, GatewayError>;
}
