//! Gateway error types.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::game::StateViolation;

/// What went wrong talking to the game server.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GatewayErrorKind {
    /// The request could not be sent or no response arrived.
    #[display("Network failure: {}", _0)]
    Transport(String),

    /// The server answered with a non-success status, e.g. an illegal move.
    #[display("Server rejected request ({}): {}", status, message)]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// The response body is not a state document.
    #[display("Malformed response: {}", _0)]
    Malformed(String),

    /// The document parsed but breaks a board invariant.
    #[display("Invalid game state: {}", _0)]
    Protocol(StateViolation),

    /// A URL could not be built from the configured origin.
    #[display("Invalid URL: {}", _0)]
    Url(String),
}

/// Gateway error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Gateway error: {} at {}:{}", kind, file, line)]
pub struct GatewayError {
    /// Error category.
    pub kind: GatewayErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GatewayError {
    /// Creates a new gateway error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(GatewayErrorKind::Transport(err.to_string()))
    }
}

impl From<StateViolation> for GatewayError {
    #[track_caller]
    fn from(err: StateViolation) -> Self {
        Self::new(GatewayErrorKind::Protocol(err))
    }
}
