//! Round trips to the server and the actions they produce.
//!
//! Nothing is applied to the store until the server has answered. A failed
//! call emits no action and leaves the projection at its last confirmed value.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::game::{Difficulty, GameId, GameState, PlayerInfo};
use crate::gateway::{GameGateway, GatewayError, GatewayErrorKind};
use crate::store::{Action, GameStore, set_game_state, update_state};

/// Which request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Creating a session.
    Create,
    /// Dropping a disc into a column.
    Move {
        /// Target column.
        column: u32,
    },
    /// Clearing the board.
    Reset,
    /// Re-reading the session.
    Refresh,
}

/// Why the last request failed, as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DispatchFailure {
    /// Server unreachable or timed out.
    #[display("Network failure: {}", _0)]
    Network(String),
    /// Server refused the request, e.g. an illegal column.
    #[display("Rejected by server: {}", _0)]
    Rejected(String),
    /// Server answered with something that is not a valid game state.
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),
}

impl From<&GatewayErrorKind> for DispatchFailure {
    fn from(kind: &GatewayErrorKind) -> Self {
        match kind {
            GatewayErrorKind::Transport(msg) | GatewayErrorKind::Url(msg) => {
                DispatchFailure::Network(msg.clone())
            }
            GatewayErrorKind::Rejected { status, message } => {
                DispatchFailure::Rejected(format!("{} {}", status, message))
            }
            GatewayErrorKind::Malformed(msg) => DispatchFailure::InvalidResponse(msg.clone()),
            GatewayErrorKind::Protocol(violation) => {
                DispatchFailure::InvalidResponse(violation.to_string())
            }
        }
    }
}

/// In-flight state of the dispatcher, published for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DispatchStatus {
    /// Ready to send.
    #[default]
    Idle,
    /// A request is outstanding; further requests are refused.
    Submitting(RequestKind),
    /// The last request failed. A new request may be sent.
    Failed(DispatchFailure),
}

impl DispatchStatus {
    /// Returns true while a request is outstanding.
    pub fn is_submitting(&self) -> bool {
        matches!(self, DispatchStatus::Submitting(_))
    }
}

/// Error returned by dispatcher operations.
#[derive(Debug, Clone, derive_more::Display)]
pub enum DispatchError {
    /// Another request is still outstanding.
    #[display("A request is already in flight")]
    Busy,

    /// No session exists in the store.
    #[display("No game in progress")]
    NoSession,

    /// The session is over; only a reset or a new game is accepted.
    #[display("Game {} is already finished", _0)]
    GameFinished(GameId),

    /// The gateway call failed.
    #[display("{}", _0)]
    Gateway(GatewayError),
}

impl std::error::Error for DispatchError {}

impl From<GatewayError> for DispatchError {
    fn from(err: GatewayError) -> Self {
        DispatchError::Gateway(err)
    }
}

/// Orchestrates "request → server → store".
pub struct MoveDispatcher<G> {
    gateway: Arc<G>,
    store: GameStore,
    status: Arc<watch::Sender<DispatchStatus>>,
}

impl<G> Clone for MoveDispatcher<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
            status: Arc::clone(&self.status),
        }
    }
}

impl<G> std::fmt::Debug for MoveDispatcher<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveDispatcher")
            .field("store", &self.store)
            .field("status", &*self.status.borrow())
            .finish_non_exhaustive()
    }
}

impl<G: GameGateway> MoveDispatcher<G> {
    /// Creates a dispatcher writing into `store`.
    #[instrument(skip_all)]
    pub fn new(gateway: G, store: GameStore) -> Self {
        info!("Creating move dispatcher");
        let (status, _rx) = watch::channel(DispatchStatus::Idle);
        Self {
            gateway: Arc::new(gateway),
            store,
            status: Arc::new(status),
        }
    }

    /// The store this dispatcher writes into.
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Current in-flight state.
    pub fn status(&self) -> DispatchStatus {
        self.status.borrow().clone()
    }

    /// Receiver observing in-flight state changes.
    pub fn subscribe_status(&self) -> watch::Receiver<DispatchStatus> {
        self.status.subscribe()
    }

    /// Drops a disc into `column` and emits `UPDATE_STATE` with the reply.
    ///
    /// Column legality is left to the server.
    #[instrument(skip(self, game_id), fields(game_id = %game_id))]
    pub async fn submit_move(&self, game_id: &GameId, column: u32) -> Result<Action, DispatchError> {
        let current = self.store.snapshot();
        if current.id.as_ref() == Some(game_id) && current.finished.is_some() {
            warn!("Move refused, game already finished");
            return Err(DispatchError::GameFinished(game_id.clone()));
        }
        self.round_trip(
            RequestKind::Move { column },
            self.gateway.submit_move(game_id, column),
            |state| update_state(state),
        )
        .await
    }

    /// Creates a session and emits `SET_GAME_STATE` with `player_info`.
    #[instrument(skip(self, player_info))]
    pub async fn create_game(
        &self,
        player_info: PlayerInfo,
        difficulty: Option<Difficulty>,
    ) -> Result<Action, DispatchError> {
        self.round_trip(
            RequestKind::Create,
            self.gateway.create_game(difficulty.as_ref()),
            |state| set_game_state(player_info, state),
        )
        .await
    }

    /// Resets the board and emits `UPDATE_STATE` with the fresh document.
    #[instrument(skip(self, game_id), fields(game_id = %game_id))]
    pub async fn reset_game(&self, game_id: &GameId) -> Result<Action, DispatchError> {
        self.round_trip(
            RequestKind::Reset,
            self.gateway.reset_game(game_id),
            |state| update_state(state),
        )
        .await
    }

    /// Re-reads the session and emits `UPDATE_STATE` with the document.
    #[instrument(skip(self, game_id), fields(game_id = %game_id))]
    pub async fn refresh(&self, game_id: &GameId) -> Result<Action, DispatchError> {
        self.round_trip(
            RequestKind::Refresh,
            self.gateway.fetch_state(game_id),
            |state| update_state(state),
        )
        .await
    }

    /// [`submit_move`](Self::submit_move) for the session in the store.
    #[instrument(skip(self))]
    pub async fn submit_current(&self, column: u32) -> Result<Action, DispatchError> {
        let game_id = self.current_id()?;
        self.submit_move(&game_id, column).await
    }

    /// [`reset_game`](Self::reset_game) for the session in the store.
    #[instrument(skip(self))]
    pub async fn reset_current(&self) -> Result<Action, DispatchError> {
        let game_id = self.current_id()?;
        self.reset_game(&game_id).await
    }

    fn current_id(&self) -> Result<GameId, DispatchError> {
        self.store.snapshot().id.ok_or(DispatchError::NoSession)
    }

    /// Runs one single-flight request and applies its action on success.
    async fn round_trip<F, A>(
        &self,
        kind: RequestKind,
        call: F,
        into_action: A,
    ) -> Result<Action, DispatchError>
    where
        F: Future<Output = Result<GameState, GatewayError>>,
        A: FnOnce(GameState) -> Action,
    {
        let in_flight = self.begin(kind)?;

        match call.await {
            Ok(state) => {
                let action = into_action(state);
                self.store.dispatch(&action);
                in_flight.settle(DispatchStatus::Idle);
                debug!(?kind, action = action.kind(), "Request applied");
                Ok(action)
            }
            Err(e) => {
                warn!(?kind, error = %e, "Request failed, store unchanged");
                in_flight.settle(DispatchStatus::Failed(DispatchFailure::from(&e.kind)));
                Err(DispatchError::Gateway(e))
            }
        }
    }

    /// Claims the single in-flight slot.
    fn begin(&self, kind: RequestKind) -> Result<InFlight<'_>, DispatchError> {
        let claimed = self.status.send_if_modified(|status| {
            if status.is_submitting() {
                false
            } else {
                *status = DispatchStatus::Submitting(kind);
                true
            }
        });
        if !claimed {
            warn!(?kind, "Request refused, another is in flight");
            return Err(DispatchError::Busy);
        }
        Ok(InFlight {
            status: &self.status,
            settled: false,
        })
    }
}

/// Releases the in-flight slot; falls back to `Idle` if dropped unsettled.
struct InFlight<'a> {
    status: &'a watch::Sender<DispatchStatus>,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, next: DispatchStatus) {
        self.status.send_replace(next);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.status.send_replace(DispatchStatus::Idle);
        }
    }
}
