//! Screen selection driven by the projection.
//!
//! The controller reads `id`, `finished` and `difficulty`; it never writes
//! to the store.

use strum::Display;
use tracing::{debug, info, instrument};

use crate::store::GameProjection;

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Screen {
    /// Welcome screen.
    Landing,
    /// Two-player setup form.
    #[strum(serialize = "New Game")]
    NewGame,
    /// Vs-CPU setup form.
    #[strum(serialize = "New Game vs CPU")]
    NewGameCpu,
    /// Board and column selector.
    #[strum(serialize = "Play")]
    PlayGame,
    /// Result and rematch options.
    #[strum(serialize = "Game Over")]
    GameOver,
}

/// Screen actually shown when `requested` is asked for.
///
/// Play needs a session, game-over needs a result; otherwise the player is
/// sent to set up a new game.
#[instrument(skip(projection))]
pub fn resolve(requested: Screen, projection: &GameProjection) -> Screen {
    let resolved = match requested {
        Screen::PlayGame if projection.id.is_none() => Screen::NewGame,
        Screen::GameOver if projection.finished.is_none() => Screen::NewGame,
        other => other,
    };
    if resolved != requested {
        info!(?requested, ?resolved, "Redirecting");
    }
    resolved
}

/// Screen to move to after the projection changed while on `current`.
#[instrument(skip(projection))]
pub fn follow(current: Screen, projection: &GameProjection) -> Screen {
    let next = match current {
        Screen::PlayGame if projection.finished.is_some() => Screen::GameOver,
        Screen::GameOver if projection.id.is_some() && projection.finished.is_none() => {
            Screen::PlayGame
        }
        Screen::NewGame | Screen::NewGameCpu | Screen::Landing => current,
        other => resolve(other, projection),
    };
    debug!(?current, ?next, "Followed store change");
    next
}

/// Setup screen offered for a rematch.
#[instrument(skip(projection))]
pub fn rematch(projection: &GameProjection) -> Screen {
    if projection.difficulty.is_some() {
        Screen::NewGameCpu
    } else {
        Screen::NewGame
    }
}
