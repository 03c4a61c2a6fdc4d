//! Core domain types shared by the store, the gateway and the views.

use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::instrument;

/// Opaque session identifier assigned by the server.
///
/// The server is free to use numbers or strings; whichever it sends is kept
/// and echoed back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    /// Numeric identifier, e.g. `104`.
    Number(u64),
    /// Textual identifier.
    Text(String),
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameId::Number(n) => write!(f, "{}", n),
            GameId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        GameId::Number(id)
    }
}

/// Only canonical decimal text becomes a number, so `"007"` stays text.
impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        match id.parse::<u64>() {
            Ok(n) if n.to_string() == id => GameId::Number(n),
            _ => GameId::Text(id.to_string()),
        }
    }
}

/// One of the two seats at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PlayerSlot {
    /// First player, moves first on a fresh board.
    #[serde(rename = "player_1")]
    #[strum(serialize = "player_1")]
    Player1,
    /// Second player (the CPU in a single-player session).
    #[serde(rename = "player_2")]
    #[strum(serialize = "player_2")]
    Player2,
}

impl PlayerSlot {
    /// Returns the other seat.
    #[instrument]
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::Player1 => PlayerSlot::Player2,
            PlayerSlot::Player2 => PlayerSlot::Player1,
        }
    }
}

/// Terminal result of a session, carried in the `finished` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// Player 1 connected four.
    #[serde(rename = "player_1")]
    #[strum(serialize = "player_1")]
    Player1,
    /// Player 2 connected four.
    #[serde(rename = "player_2")]
    #[strum(serialize = "player_2")]
    Player2,
    /// Board filled without a winner.
    #[serde(rename = "draw")]
    #[strum(serialize = "draw")]
    Draw,
}

impl Outcome {
    /// Returns the winning seat, or `None` for a draw.
    #[instrument]
    pub fn winner(self) -> Option<PlayerSlot> {
        match self {
            Outcome::Player1 => Some(PlayerSlot::Player1),
            Outcome::Player2 => Some(PlayerSlot::Player2),
            Outcome::Draw => None,
        }
    }
}

/// Opponent-strength tag for sessions against the CPU.
///
/// The server owns the set of valid levels, so the tag is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(String);

impl Difficulty {
    /// Wraps a level name as sent to and from the server.
    pub fn new(level: impl Into<String>) -> Self {
        Self(level.into())
    }

    /// Returns the level name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display names for both seats.
///
/// Held client-side only; supplied when a game is created and never sent
/// back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PlayerInfo {
    /// Name shown for player 1.
    pub player_1: String,
    /// Name shown for player 2.
    pub player_2: String,
}

impl PlayerInfo {
    /// Returns the display name for a seat.
    pub fn name_of(&self, slot: PlayerSlot) -> &str {
        match slot {
            PlayerSlot::Player1 => &self.player_1,
            PlayerSlot::Player2 => &self.player_2,
        }
    }
}
