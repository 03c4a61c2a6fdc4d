//! Full game-state document returned by every gateway call.

use std::collections::{BTreeSet, HashMap};

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::board::Board;
use super::cell::Cell;
use super::types::{Difficulty, GameId, Outcome, PlayerSlot};

/// Most recent move: who played and where the disc landed.
///
/// Wire form is `["player_1", [row, column]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlay(pub PlayerSlot, pub Cell);

impl LastPlay {
    /// Seat that made the move.
    pub fn player(&self) -> PlayerSlot {
        self.0
    }

    /// Cell the disc landed in.
    pub fn cell(&self) -> Cell {
        self.1
    }
}

/// Server-authoritative state of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    /// Session identifier.
    id: GameId,
    /// Number of columns.
    width: u32,
    /// Number of rows.
    height: u32,
    /// Occupancy sets.
    board: Board,
    /// Columns that can still take a disc.
    avail_cols: Vec<u32>,
    /// Seat whose move is awaited.
    current_player: PlayerSlot,
    /// Most recent move, absent on a fresh board.
    #[serde(default)]
    last_play: Option<LastPlay>,
    /// Result once the session is over.
    #[serde(default)]
    finished: Option<Outcome>,
    /// CPU strength, absent for two-human sessions.
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

/// A structural problem in a state document.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StateViolation {
    /// Width or height is zero.
    #[display("Board dimensions must be positive, got {}x{}", width, height)]
    EmptyDimensions {
        /// Reported width.
        width: u32,
        /// Reported height.
        height: u32,
    },

    /// A listed cell lies outside the board.
    #[display("Cell {} is outside a {}x{} board", _0, _1, _2)]
    OutOfBounds(Cell, u32, u32),

    /// A cell appears more than once across the occupancy sets.
    #[display("Cell {} is listed more than once", _0)]
    DuplicateCell(Cell),

    /// The occupancy sets do not cover the whole board.
    #[display("Board lists {} cells, expected {}", found, expected)]
    IncompleteBoard {
        /// Cells listed.
        found: usize,
        /// Cells on the board.
        expected: usize,
    },

    /// `avail_cols` disagrees with the free cells.
    #[display("avail_cols {:?} does not match open columns {:?}", reported, derived)]
    AvailableColumnsMismatch {
        /// Columns the server reported.
        reported: Vec<u32>,
        /// Columns derived from the free set.
        derived: Vec<u32>,
    },

    /// `last_play` names a cell its player does not own.
    #[display("last_play {} is not owned by {}", _1, _0)]
    LastPlayMismatch(PlayerSlot, Cell),
}

impl std::error::Error for StateViolation {}

impl GameState {
    /// Assembles a state document.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: GameId,
        width: u32,
        height: u32,
        board: Board,
        avail_cols: Vec<u32>,
        current_player: PlayerSlot,
        last_play: Option<LastPlay>,
        finished: Option<Outcome>,
        difficulty: Option<Difficulty>,
    ) -> Self {
        Self {
            id,
            width,
            height,
            board,
            avail_cols,
            current_player,
            last_play,
            finished,
            difficulty,
        }
    }

    /// A fresh session: every cell free, player 1 to move.
    #[instrument]
    pub fn fresh(id: GameId, height: u32, width: u32, difficulty: Option<Difficulty>) -> Self {
        let board = Board::empty(height, width);
        let avail_cols = board.open_columns();
        Self::new(
            id,
            width,
            height,
            board,
            avail_cols,
            PlayerSlot::Player1,
            None,
            None,
            difficulty,
        )
    }

    /// Checks the structural invariants of the document.
    ///
    /// Runs on every response before it reaches the store, so a stale or
    /// truncated document is rejected instead of half-merged.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn validate(&self) -> Result<(), StateViolation> {
        if self.width == 0 || self.height == 0 {
            return Err(StateViolation::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let mut owners: HashMap<Cell, Option<PlayerSlot>> = HashMap::new();
        let sets = [
            (&self.board.free, None),
            (&self.board.player_1, Some(PlayerSlot::Player1)),
            (&self.board.player_2, Some(PlayerSlot::Player2)),
        ];
        for (cells, owner) in sets {
            for cell in cells {
                if !cell.is_within(self.height, self.width) {
                    warn!(%cell, "Cell outside board");
                    return Err(StateViolation::OutOfBounds(*cell, self.width, self.height));
                }
                if owners.insert(*cell, owner).is_some() {
                    warn!(%cell, "Cell listed twice");
                    return Err(StateViolation::DuplicateCell(*cell));
                }
            }
        }

        let expected = (self.width as usize) * (self.height as usize);
        if owners.len() != expected {
            return Err(StateViolation::IncompleteBoard {
                found: owners.len(),
                expected,
            });
        }

        let derived = self.board.open_columns();
        let reported: Vec<u32> = self
            .avail_cols
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if reported != derived || reported.len() != self.avail_cols.len() {
            return Err(StateViolation::AvailableColumnsMismatch {
                reported: self.avail_cols.clone(),
                derived,
            });
        }

        if let Some(last) = self.last_play
            && owners.get(&last.cell()) != Some(&Some(last.player()))
        {
            return Err(StateViolation::LastPlayMismatch(last.player(), last.cell()));
        }

        debug!("State document valid");
        Ok(())
    }
}
