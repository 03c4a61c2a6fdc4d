//! Tests for cells, boards, document validation and the grid mapper.

mod common;

use common::{build_game_state, game_state_json};
use connect_four_client::{
    Board, Cell, GameId, GameState, LastPlay, Occupant, PlayerSlot, StateViolation, classify,
    render_rows,
};
use serde_json::json;

#[test]
fn test_cell_wire_form_is_row_then_column() {
    let cell: Cell = serde_json::from_value(json!([2, 5])).expect("Parse failed");
    assert_eq!(cell.row, 2);
    assert_eq!(cell.column, 5);
    assert_eq!(serde_json::to_value(cell).expect("Serialize failed"), json!([2, 5]));
}

#[test]
fn test_cell_bounds() {
    assert!(Cell::new(1, 1).is_within(6, 7));
    assert!(Cell::new(6, 7).is_within(6, 7));
    assert!(!Cell::new(7, 1).is_within(6, 7));
    assert!(!Cell::new(0, 3).is_within(6, 7));
}

#[test]
fn test_empty_board_covers_every_cell() {
    let board = Board::empty(6, 7);
    assert_eq!(board.len(), 42);
    assert_eq!(board.open_columns(), (1..=7).collect::<Vec<_>>());
}

#[test]
fn test_render_rows_top_row_first() {
    let state = build_game_state(true);
    let rows = render_rows(*state.height(), *state.width(), state.board());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].row, 2);
    assert_eq!(rows[1].row, 1);
    assert_eq!(rows[0].cells, vec![Occupant::Empty, Occupant::Empty]);
    assert_eq!(rows[1].cells, vec![Occupant::Player1, Occupant::Empty]);
}

#[test]
fn test_classify_every_cell_exactly_once() {
    let state = build_game_state(true);
    let board = state.board();
    for row in 1..=*state.height() {
        for column in 1..=*state.width() {
            let cell = Cell::new(row, column);
            let expected = if board.player_1.contains(&cell) {
                Occupant::Player1
            } else if board.player_2.contains(&cell) {
                Occupant::Player2
            } else {
                assert!(board.free.contains(&cell));
                Occupant::Empty
            };
            assert_eq!(classify(cell, board), expected);
        }
    }
}

#[test]
fn test_fixtures_validate() {
    build_game_state(false).validate().expect("Fresh board invalid");
    build_game_state(true).validate().expect("Played board invalid");
    GameState::fresh(GameId::from(7), 6, 7, None)
        .validate()
        .expect("Fresh 6x7 invalid");
}

#[test]
fn test_validate_rejects_duplicate_cell() {
    let mut doc = game_state_json(true);
    doc["board"]["player_2"] = json!([[1, 1]]);
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert_eq!(
        state.validate(),
        Err(StateViolation::DuplicateCell(Cell::new(1, 1)))
    );
}

#[test]
fn test_validate_rejects_missing_cell() {
    let mut doc = game_state_json(false);
    doc["board"]["free"] = json!([[1, 1], [1, 2], [2, 1]]);
    doc["avail_cols"] = json!([1, 2]);
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert_eq!(
        state.validate(),
        Err(StateViolation::IncompleteBoard {
            found: 3,
            expected: 4
        })
    );
}

#[test]
fn test_validate_rejects_out_of_bounds_cell() {
    let mut doc = game_state_json(false);
    doc["board"]["free"] = json!([[1, 1], [1, 2], [2, 1], [3, 2]]);
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert!(matches!(
        state.validate(),
        Err(StateViolation::OutOfBounds(cell, 2, 2)) if cell == Cell::new(3, 2)
    ));
}

#[test]
fn test_validate_rejects_stale_avail_cols() {
    let mut doc = game_state_json(false);
    doc["avail_cols"] = json!([1]);
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert!(matches!(
        state.validate(),
        Err(StateViolation::AvailableColumnsMismatch { .. })
    ));
}

#[test]
fn test_validate_rejects_last_play_on_foreign_cell() {
    let mut doc = game_state_json(true);
    doc["last_play"] = json!(["player_2", [1, 1]]);
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert_eq!(
        state.validate(),
        Err(StateViolation::LastPlayMismatch(
            PlayerSlot::Player2,
            Cell::new(1, 1)
        ))
    );
}

#[test]
fn test_validate_rejects_zero_dimensions() {
    let state = GameState::new(
        GameId::from(1),
        0,
        2,
        Board::default(),
        Vec::new(),
        PlayerSlot::Player1,
        None,
        None,
        None,
    );
    assert!(matches!(
        state.validate(),
        Err(StateViolation::EmptyDimensions { width: 0, height: 2 })
    ));
}

#[test]
fn test_optional_fields_may_be_omitted() {
    let mut doc = game_state_json(true);
    let object = doc.as_object_mut().expect("Fixture is an object");
    object.remove("finished");
    object.remove("difficulty");
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert_eq!(*state.finished(), None);
    assert_eq!(
        *state.last_play(),
        Some(LastPlay(PlayerSlot::Player1, Cell::new(1, 1)))
    );
}

#[test]
fn test_text_game_id_round_trips() {
    let mut doc = game_state_json(false);
    doc["id"] = json!("abc-123");
    let state: GameState = serde_json::from_value(doc).expect("Parse failed");
    assert_eq!(state.id(), &GameId::Text("abc-123".to_string()));
    assert_eq!(state.id().to_string(), "abc-123");
}
