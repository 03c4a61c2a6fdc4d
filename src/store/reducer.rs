//! Pure state transition function.

use tracing::{debug, instrument, warn};

use super::action::Action;
use super::projection::{GameProjection, SessionPhase};

/// Applies one action, returning the next projection.
///
/// `state` is never modified. `SET_GAME_STATE` starts from an empty
/// projection; `UPDATE_STATE` overlays the patch on the current one and keeps
/// the display names.
#[instrument(skip_all, fields(action = action.kind()))]
pub fn reduce(state: &GameProjection, action: &Action) -> GameProjection {
    let next = match action {
        Action::SetGameState {
            player_info,
            game_state,
        } => GameProjection::from_session(player_info.clone(), game_state.clone()),
        Action::UpdateState { state: patch } => {
            if patch.is_empty() {
                debug!("Empty patch");
                return state.clone();
            }
            state.merged(patch)
        }
    };

    let (from, to) = (state.phase(), next.phase());
    if !is_valid_transition(from, to, &next) {
        warn!(?from, ?to, "Unexpected phase transition applied from server state");
    }
    debug!(?from, ?to, "Reduced");
    next
}

/// Checks a phase change against the session lifecycle.
///
/// Leaving `Terminal` is only expected for a reset, which brings a fresh
/// board with no `last_play`. While play continues, the seat to move is the
/// opponent of whoever made the last play.
fn is_valid_transition(from: SessionPhase, to: SessionPhase, next: &GameProjection) -> bool {
    match (from, to) {
        (SessionPhase::Terminal(a), SessionPhase::Terminal(b)) => a == b,
        (SessionPhase::Terminal(_), SessionPhase::AwaitingTurn(_)) => next.last_play.is_none(),
        (SessionPhase::AwaitingTurn(_), SessionPhase::AwaitingTurn(player)) => next
            .last_play
            .is_none_or(|last| last.player().opponent() == player),
        (SessionPhase::Terminal(_), SessionPhase::Uninitialized) => false,
        (SessionPhase::AwaitingTurn(_), SessionPhase::Uninitialized) => false,
        _ => true,
    }
}
