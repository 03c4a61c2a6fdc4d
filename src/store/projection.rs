//! The client's copy of the most recently confirmed session state.

use tracing::instrument;

use crate::game::{
    Board, Difficulty, GameId, GameState, GridRow, LastPlay, Outcome, PlayerInfo, PlayerSlot,
    render_rows,
};

use super::action::GameStatePatch;

/// Store contents.
///
/// Every server field is optional because the projection starts empty
/// (`id` absent) and a partial update may have populated only some of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameProjection {
    /// Session identifier, absent before a game exists.
    pub id: Option<GameId>,
    /// Number of columns.
    pub width: Option<u32>,
    /// Number of rows.
    pub height: Option<u32>,
    /// Occupancy sets.
    pub board: Option<Board>,
    /// Columns that can still take a disc.
    pub avail_cols: Option<Vec<u32>>,
    /// Seat whose move is awaited.
    pub current_player: Option<PlayerSlot>,
    /// Most recent move.
    pub last_play: Option<LastPlay>,
    /// Result once the session is over.
    pub finished: Option<Outcome>,
    /// CPU strength.
    pub difficulty: Option<Difficulty>,
    /// Client-side display names.
    pub player_info: Option<PlayerInfo>,
}

/// Coarse lifecycle of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session yet.
    Uninitialized,
    /// Waiting for the given seat to move.
    AwaitingTurn(PlayerSlot),
    /// Session is over.
    Terminal(Outcome),
}

impl GameProjection {
    /// Builds a projection from a complete session document.
    ///
    /// Display names are stored beside the server fields, never on top of
    /// them.
    #[instrument(skip_all, fields(id = %game_state.id()))]
    pub fn from_session(player_info: PlayerInfo, game_state: GameState) -> Self {
        let patch = GameStatePatch::from(game_state);
        Self {
            player_info: Some(player_info),
            ..Self::default()
        }
        .merged(&patch)
    }

    /// Returns `{ ...self, ...patch }` as a new value.
    pub fn merged(&self, patch: &GameStatePatch) -> Self {
        let mut next = self.clone();
        if let Some(id) = &patch.id {
            next.id = Some(id.clone());
        }
        if let Some(width) = patch.width {
            next.width = Some(width);
        }
        if let Some(height) = patch.height {
            next.height = Some(height);
        }
        if let Some(board) = &patch.board {
            next.board = Some(board.clone());
        }
        if let Some(avail_cols) = &patch.avail_cols {
            next.avail_cols = Some(avail_cols.clone());
        }
        if let Some(current_player) = patch.current_player {
            next.current_player = Some(current_player);
        }
        if let Some(last_play) = patch.last_play {
            next.last_play = last_play;
        }
        if let Some(finished) = patch.finished {
            next.finished = finished;
        }
        if let Some(difficulty) = &patch.difficulty {
            next.difficulty = difficulty.clone();
        }
        next
    }

    /// Derives the lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        match (&self.id, self.finished, self.current_player) {
            (None, _, _) => SessionPhase::Uninitialized,
            (Some(_), Some(outcome), _) => SessionPhase::Terminal(outcome),
            (Some(_), None, Some(player)) => SessionPhase::AwaitingTurn(player),
            (Some(_), None, None) => SessionPhase::Uninitialized,
        }
    }

    /// Returns true if `column` is currently playable.
    pub fn is_column_open(&self, column: u32) -> bool {
        self.avail_cols
            .as_ref()
            .is_some_and(|cols| cols.contains(&column))
    }

    /// Display name of a seat, falling back to the seat tag.
    pub fn name_of(&self, slot: PlayerSlot) -> String {
        self.player_info
            .as_ref()
            .map(|info| info.name_of(slot).to_string())
            .unwrap_or_else(|| slot.to_string())
    }

    /// Grid rows for rendering, top row first; empty until a board arrives.
    pub fn grid(&self) -> Vec<GridRow> {
        match (self.height, self.width, &self.board) {
            (Some(height), Some(width), Some(board)) => render_rows(height, width, board),
            _ => Vec::new(),
        }
    }

    /// Human-readable result line for the game-over screen.
    pub fn result_text(&self) -> Option<String> {
        self.finished.map(|outcome| match outcome.winner() {
            None => "Game ended in a draw".to_string(),
            Some(slot) => format!("{} won this round!", self.name_of(slot)),
        })
    }
}
