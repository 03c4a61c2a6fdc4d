//! Endpoint URLs of the game API.

use reqwest::Url;
use tracing::{debug, instrument};

use crate::game::{Difficulty, GameId};

use super::error::{GatewayError, GatewayErrorKind};

/// URL builder rooted at the server's origin.
///
/// The base is always `scheme://host[:port]/`; any path, query or fragment
/// on the configured URL is dropped, and default ports are omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    base: Url,
}

impl ApiRoutes {
    /// Derives the routes from any URL on the target origin.
    #[instrument]
    pub fn from_origin(url: &str) -> Result<Self, GatewayError> {
        let parsed = Url::parse(url)
            .map_err(|e| GatewayError::new(GatewayErrorKind::Url(format!("{}: {}", url, e))))?;
        let origin = parsed.origin();
        if !origin.is_tuple() {
            return Err(GatewayError::new(GatewayErrorKind::Url(format!(
                "{} has no scheme/host origin",
                url
            ))));
        }
        let base = Url::parse(&format!("{}/", origin.ascii_serialization()))
            .map_err(|e| GatewayError::new(GatewayErrorKind::Url(e.to_string())))?;
        debug!(base = %base, "Derived API base");
        Ok(Self { base })
    }

    /// The origin root, e.g. `http://localhost:9876/`.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `POST /api/game[?difficulty=level]`
    pub fn new_game(&self, difficulty: Option<&Difficulty>) -> Url {
        let mut url = self.path(&["api", "game"]);
        if let Some(level) = difficulty {
            url.query_pairs_mut()
                .append_pair("difficulty", level.as_str());
        }
        url
    }

    /// `PUT /api/game/{id}?col={column}`
    pub fn make_move(&self, id: &GameId, column: u32) -> Url {
        let mut url = self.path(&["api", "game", &id.to_string()]);
        url.query_pairs_mut()
            .append_pair("col", &column.to_string());
        url
    }

    /// `PUT /api/game/reset/{id}`
    pub fn reset_game(&self, id: &GameId) -> Url {
        self.path(&["api", "game", "reset", &id.to_string()])
    }

    /// `GET /api/game/{id}`
    pub fn game_state(&self, id: &GameId) -> Url {
        self.path(&["api", "game", &id.to_string()])
    }

    fn path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // An origin URL always has a path, so the segments can be pushed.
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }
}
