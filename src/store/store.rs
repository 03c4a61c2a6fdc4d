//! Application-owned container for the projection.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use super::action::Action;
use super::projection::GameProjection;
use super::reducer::reduce;

/// Handle to the single game-state store.
///
/// Cloning the handle shares the same store. Actions are applied one at a
/// time to completion; readers take snapshots or subscribe for change
/// notifications.
#[derive(Debug, Clone)]
pub struct GameStore {
    tx: Arc<watch::Sender<GameProjection>>,
}

impl GameStore {
    /// Creates a store holding the initial (empty) projection.
    #[instrument]
    pub fn new() -> Self {
        Self::with_state(GameProjection::default())
    }

    /// Creates a store holding `state`.
    #[instrument(skip(state))]
    pub fn with_state(state: GameProjection) -> Self {
        info!("Creating game store");
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    /// Applies `action` and returns the resulting projection.
    ///
    /// Subscribers are notified only when the projection actually changed.
    #[instrument(skip_all, fields(action = action.kind()))]
    pub fn dispatch(&self, action: &Action) -> GameProjection {
        let mut result = GameProjection::default();
        let changed = self.tx.send_if_modified(|state| {
            let next = reduce(state, action);
            result = next.clone();
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        debug!(changed, "Action dispatched");
        result
    }

    /// Returns a copy of the current projection.
    pub fn snapshot(&self) -> GameProjection {
        self.tx.borrow().clone()
    }

    /// Returns a receiver that observes every change.
    pub fn subscribe(&self) -> watch::Receiver<GameProjection> {
        self.tx.subscribe()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
