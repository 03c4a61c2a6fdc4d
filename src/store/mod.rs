mod action;
mod projection;
mod reducer;
#[allow(clippy::module_inception)]
mod store;

pub use action::{Action, GameStatePatch, SET_GAME_STATE, UPDATE_STATE, set_game_state, update_state};
pub use projection::{GameProjection, SessionPhase};
pub use reducer::reduce;
pub use store::GameStore;
