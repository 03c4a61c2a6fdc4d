//! Shared fixtures for integration tests.

#![allow(dead_code)]

use connect_four_client::{GameState, PlayerInfo};
use serde_json::{Value, json};

/// 2x2 session document, optionally after player 1 played (1, 1).
pub fn game_state_json(made_move: bool) -> Value {
    if made_move {
        json!({
            "id": 1,
            "board": {
                "free": [[1, 2], [2, 1], [2, 2]],
                "player_1": [[1, 1]],
                "player_2": []
            },
            "height": 2,
            "width": 2,
            "last_play": ["player_1", [1, 1]],
            "avail_cols": [1, 2],
            "current_player": "player_2",
            "finished": null,
            "difficulty": null
        })
    } else {
        json!({
            "id": 1,
            "board": {
                "free": [[1, 1], [1, 2], [2, 1], [2, 2]],
                "player_1": [],
                "player_2": []
            },
            "height": 2,
            "width": 2,
            "last_play": null,
            "avail_cols": [1, 2],
            "current_player": "player_1",
            "finished": null,
            "difficulty": null
        })
    }
}

/// Parsed form of [`game_state_json`].
pub fn build_game_state(made_move: bool) -> GameState {
    serde_json::from_value(game_state_json(made_move)).expect("Fixture should parse")
}

/// Display names used across tests.
pub fn build_player_info() -> PlayerInfo {
    PlayerInfo::new("first".to_string(), "second".to_string())
}

/// A finished 2x2 document: player 1 holds the bottom row.
pub fn finished_game_json() -> Value {
    json!({
        "id": 1,
        "board": {
            "free": [[2, 2]],
            "player_1": [[1, 1], [1, 2]],
            "player_2": [[2, 1]]
        },
        "height": 2,
        "width": 2,
        "last_play": ["player_1", [1, 2]],
        "avail_cols": [2],
        "current_player": "player_2",
        "finished": "player_1",
        "difficulty": null
    })
}
