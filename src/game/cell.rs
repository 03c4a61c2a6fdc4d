//! Typed board coordinate.
//!
//! The canonical pair order is `(row, column)`, 1-based, with row 1 at the
//! bottom of the board. On the wire a cell is the two-element array
//! `[row, column]`; inside the crate it is always a named struct so the two
//! components cannot be transposed by accident.

use serde::{Deserialize, Serialize};

/// A single board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Cell {
    /// Row number, `1..=height`, counted from the bottom.
    pub row: u32,
    /// Column number, `1..=width`, counted from the left.
    pub column: u32,
}

impl Cell {
    /// Creates a cell at `(row, column)`.
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Returns true if the cell lies on a `height` × `width` board.
    pub fn is_within(&self, height: u32, width: u32) -> bool {
        (1..=height).contains(&self.row) && (1..=width).contains(&self.column)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((row, column): (u32, u32)) -> Self {
        Self { row, column }
    }
}

impl From<Cell> for (u32, u32) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.column)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.column)
    }
}
