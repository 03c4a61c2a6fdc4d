//! Projection of the occupancy sets onto a row/column grid.

use tracing::instrument;

use super::board::Board;
use super::cell::Cell;

/// What a single cell holds, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// No disc.
    Empty,
    /// Player 1 disc.
    Player1,
    /// Player 2 disc.
    Player2,
}

/// Classifies one cell by exact membership in the player sets.
///
/// `board.free` is not consulted: a cell in neither player set is empty.
pub fn classify(cell: Cell, board: &Board) -> Occupant {
    if board.player_1.contains(&cell) {
        Occupant::Player1
    } else if board.player_2.contains(&cell) {
        Occupant::Player2
    } else {
        Occupant::Empty
    }
}

/// One rendered row of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Row number, 1 is the bottom row.
    pub row: u32,
    /// Occupants for columns `1..=width`, left to right.
    pub cells: Vec<Occupant>,
}

/// Classifies every cell, top row first.
///
/// Rows run from `height` down to `1` so the bottom of the board comes last
/// in drawing order.
#[instrument(skip(board))]
pub fn render_rows(height: u32, width: u32, board: &Board) -> Vec<GridRow> {
    (1..=height)
        .rev()
        .map(|row| GridRow {
            row,
            cells: (1..=width)
                .map(|column| classify(Cell::new(row, column), board))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_does_not_transpose() {
        let board = Board {
            free: vec![Cell::new(1, 1), Cell::new(2, 2), Cell::new(2, 1)],
            player_1: vec![Cell::new(1, 2)],
            player_2: vec![],
        };
        assert_eq!(classify(Cell::new(1, 2), &board), Occupant::Player1);
        assert_eq!(classify(Cell::new(2, 1), &board), Occupant::Empty);
    }
}
