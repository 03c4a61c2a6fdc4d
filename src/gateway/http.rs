//! reqwest implementation of [`GameGateway`].

use std::time::Duration;

use reqwest::{Method, Url};
use tracing::{debug, info, instrument, warn};

use crate::game::{Difficulty, GameId, GameState};

use super::GameGateway;
use super::error::{GatewayError, GatewayErrorKind};
use super::routes::ApiRoutes;

/// HTTP client for the game API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    routes: ApiRoutes,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Creates a gateway for the origin of `server_url`.
    #[instrument(skip(timeout), fields(timeout_secs = timeout.as_secs()))]
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let routes = ApiRoutes::from_origin(server_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!(base = %routes.base(), "HTTP gateway ready");
        Ok(Self { routes, client })
    }

    /// Sends one request and turns the body into a validated document.
    #[instrument(skip(self, url), fields(url = %url))]
    async fn exchange(&self, method: Method, url: Url) -> Result<GameState, GatewayError> {
        debug!(%method, "Sending request");
        let response = self.client.request(method, url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Got response");

        if !status.is_success() {
            warn!(status = %status, "Server rejected request");
            return Err(GatewayError::new(GatewayErrorKind::Rejected {
                status: status.as_u16(),
                message: body,
            }));
        }

        let state: GameState = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Response is not a game state document");
            GatewayError::new(GatewayErrorKind::Malformed(e.to_string()))
        })?;
        state.validate()?;

        debug!(
            id = %state.id(),
            current_player = %state.current_player(),
            finished = ?state.finished(),
            "Parsed game state"
        );
        Ok(state)
    }
}

#[async_trait::async_trait]
impl GameGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn create_game(&self, difficulty: Option<&Difficulty>) -> Result<GameState, GatewayError> {
        info!("Creating game");
        self.exchange(Method::POST, self.routes.new_game(difficulty))
            .await
    }

    #[instrument(skip(self))]
    async fn submit_move(&self, id: &GameId, column: u32) -> Result<GameState, GatewayError> {
        info!("Submitting move");
        self.exchange(Method::PUT, self.routes.make_move(id, column))
            .await
    }

    #[instrument(skip(self))]
    async fn reset_game(&self, id: &GameId) -> Result<GameState, GatewayError> {
        info!("Resetting game");
        self.exchange(Method::PUT, self.routes.reset_game(id)).await
    }

    #[instrument(skip(self))]
    async fn fetch_state(&self, id: &GameId) -> Result<GameState, GatewayError> {
        debug!("Fetching game state");
        self.exchange(Method::GET, self.routes.game_state(id)).await
    }
}
