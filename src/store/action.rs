//! Typed intents consumed by the reducer.
//!
//! Actions serialize with an internal `"type"` tag (`SET_GAME_STATE`,
//! `UPDATE_STATE`). Decoding any other tag fails, so the reducer only ever
//! sees the two known variants.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::game::{Board, Difficulty, GameId, GameState, LastPlay, Outcome, PlayerInfo, PlayerSlot};

/// Tag of [`Action::SetGameState`].
pub const SET_GAME_STATE: &str = "SET_GAME_STATE";

/// Tag of [`Action::UpdateState`].
pub const UPDATE_STATE: &str = "UPDATE_STATE";

/// An intent to change the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the projection with a freshly created or fetched session.
    SetGameState {
        /// Display names chosen on the setup screen.
        #[serde(rename = "playerInfo")]
        player_info: PlayerInfo,
        /// Document returned by the server.
        #[serde(rename = "gameState")]
        game_state: GameState,
    },
    /// Shallow-merge a (possibly partial) document into the projection.
    UpdateState {
        /// Fields to overwrite.
        state: GameStatePatch,
    },
}

impl Action {
    /// Returns the wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetGameState { .. } => SET_GAME_STATE,
            Action::UpdateState { .. } => UPDATE_STATE,
        }
    }
}

/// Builds a `SET_GAME_STATE` action.
#[instrument(skip(player_info, game_state), fields(id = %game_state.id()))]
pub fn set_game_state(player_info: PlayerInfo, game_state: GameState) -> Action {
    Action::SetGameState {
        player_info,
        game_state,
    }
}

/// Builds an `UPDATE_STATE` action.
#[instrument(skip(state))]
pub fn update_state(state: impl Into<GameStatePatch>) -> Action {
    Action::UpdateState {
        state: state.into(),
    }
}

/// Partial state document.
///
/// `None` means "leave the field as it is". The nullable fields use a nested
/// `Option`: `Some(None)` clears the field, which is how a reset document
/// removes `finished` and `last_play`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStatePatch {
    /// New session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GameId>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Replacement occupancy sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,
    /// Replacement playable columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avail_cols: Option<Vec<u32>>,
    /// Seat now to move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_player: Option<PlayerSlot>,
    /// Most recent move, or `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_play: Option<Option<LastPlay>>,
    /// Result, or `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished: Option<Option<Outcome>>,
    /// CPU strength, or `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Option<Difficulty>>,
}

impl GameStatePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<GameState> for GameStatePatch {
    fn from(state: GameState) -> Self {
        Self {
            id: Some(state.id().clone()),
            width: Some(*state.width()),
            height: Some(*state.height()),
            board: Some(state.board().clone()),
            avail_cols: Some(state.avail_cols().clone()),
            current_player: Some(*state.current_player()),
            last_play: Some(*state.last_play()),
            finished: Some(*state.finished()),
            difficulty: Some(state.difficulty().clone()),
        }
    }
}

/// Maps a present key to `Some`, including an explicit `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
