mod board;
mod cell;
mod mapper;
mod state;
mod types;

pub use board::Board;
pub use cell::Cell;
pub use mapper::{GridRow, Occupant, classify, render_rows};
pub use state::{GameState, LastPlay, StateViolation};
pub use types::{Difficulty, GameId, Outcome, PlayerInfo, PlayerSlot};
