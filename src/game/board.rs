//! Occupancy sets as sent by the server.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::cell::Cell;

/// Three occupancy sets covering the board.
///
/// The server guarantees the sets are pairwise disjoint and that their union
/// is every cell of the board; [`GameState::validate`](crate::GameState::validate)
/// checks this when a document arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Unoccupied cells.
    pub free: Vec<Cell>,
    /// Cells holding a player 1 disc.
    pub player_1: Vec<Cell>,
    /// Cells holding a player 2 disc.
    pub player_2: Vec<Cell>,
}

impl Board {
    /// Creates a board with every cell free.
    #[instrument]
    pub fn empty(height: u32, width: u32) -> Self {
        let free = (1..=height)
            .flat_map(|row| (1..=width).map(move |column| Cell::new(row, column)))
            .collect();
        Self {
            free,
            player_1: Vec::new(),
            player_2: Vec::new(),
        }
    }

    /// Columns that still contain at least one free cell, ascending.
    #[instrument(skip(self))]
    pub fn open_columns(&self) -> Vec<u32> {
        self.free
            .iter()
            .map(|cell| cell.column)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of cells across all three sets.
    pub fn len(&self) -> usize {
        self.free.len() + self.player_1.len() + self.player_2.len()
    }

    /// Returns true when no cell is listed at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
