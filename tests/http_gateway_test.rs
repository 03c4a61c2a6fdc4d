//! Tests for the HTTP gateway against an in-process axum server.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{post, put},
};
use common::game_state_json;
use connect_four_client::{
    Difficulty, GameGateway, GameId, GatewayErrorKind, HttpGateway, PlayerSlot, StateViolation,
};
use serde_json::json;

/// Requests seen by the fake server, as `METHOD path?query`.
type Seen = Arc<Mutex<Vec<String>>>;

fn record(seen: &Seen, method: &Method, uri: &Uri) {
    seen.lock()
        .expect("Lock poisoned")
        .push(format!("{} {}", method, uri));
}

async fn create(
    State(seen): State<Seen>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&seen, &method, &uri);
    let mut doc = game_state_json(false);
    doc["id"] = json!(104);
    if let Some(level) = params.get("difficulty") {
        doc["difficulty"] = json!(level);
    }
    Json(doc).into_response()
}

async fn play(
    State(seen): State<Seen>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&seen, &method, &uri);
    match (id.as_str(), params.get("col").map(String::as_str)) {
        ("104", Some("1")) => {
            let mut doc = game_state_json(true);
            doc["id"] = json!(104);
            Json(doc).into_response()
        }
        ("garbage", _) => (StatusCode::OK, "<html>not json</html>").into_response(),
        ("broken", _) => {
            let mut doc = game_state_json(true);
            doc["board"]["player_2"] = json!([[1, 1]]);
            Json(doc).into_response()
        }
        _ => (StatusCode::BAD_REQUEST, "Column not available").into_response(),
    }
}

async fn reset(State(seen): State<Seen>, method: Method, uri: Uri) -> Response {
    record(&seen, &method, &uri);
    let mut doc = game_state_json(false);
    doc["id"] = json!(104);
    Json(doc).into_response()
}

async fn fetch(State(seen): State<Seen>, method: Method, uri: Uri) -> Response {
    record(&seen, &method, &uri);
    let mut doc = game_state_json(true);
    doc["id"] = json!(104);
    Json(doc).into_response()
}

/// Starts the fake server; returns a URL on its origin with an extra path.
async fn spawn_server() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/game", post(create))
        .route("/api/game/{id}", put(play).get(fetch))
        .route("/api/game/reset/{id}", put(reset))
        .with_state(Arc::clone(&seen));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind failed");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    (format!("http://{}/play?tab=1", addr), seen)
}

fn gateway(url: &str) -> HttpGateway {
    HttpGateway::new(url, Duration::from_secs(5)).expect("Gateway setup failed")
}

#[tokio::test]
async fn test_create_game_posts_to_origin() {
    let (url, seen) = spawn_server().await;
    let gateway = gateway(&url);

    let state = gateway
        .create_game(Some(&Difficulty::new("easy")))
        .await
        .expect("Create failed");

    assert_eq!(state.id(), &GameId::from(104));
    assert_eq!(state.difficulty().as_ref(), Some(&Difficulty::new("easy")));
    assert_eq!(
        *seen.lock().expect("Lock poisoned"),
        vec!["POST /api/game?difficulty=easy".to_string()]
    );
}

#[tokio::test]
async fn test_create_game_without_difficulty_has_no_query() {
    let (url, seen) = spawn_server().await;

    gateway(&url).create_game(None).await.expect("Create failed");

    assert_eq!(
        *seen.lock().expect("Lock poisoned"),
        vec!["POST /api/game".to_string()]
    );
}

#[tokio::test]
async fn test_submit_move_puts_column() {
    let (url, seen) = spawn_server().await;

    let state = gateway(&url)
        .submit_move(&GameId::from(104), 1)
        .await
        .expect("Move failed");

    assert_eq!(*state.current_player(), PlayerSlot::Player2);
    assert_eq!(
        *seen.lock().expect("Lock poisoned"),
        vec!["PUT /api/game/104?col=1".to_string()]
    );
}

#[tokio::test]
async fn test_reset_and_fetch_routes() {
    let (url, seen) = spawn_server().await;
    let gateway = gateway(&url);

    let reset = gateway
        .reset_game(&GameId::from(104))
        .await
        .expect("Reset failed");
    assert_eq!(*reset.last_play(), None);

    let fetched = gateway
        .fetch_state(&GameId::from(104))
        .await
        .expect("Fetch failed");
    assert!(fetched.last_play().is_some());

    assert_eq!(
        *seen.lock().expect("Lock poisoned"),
        vec![
            "PUT /api/game/reset/104".to_string(),
            "GET /api/game/104".to_string()
        ]
    );
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let (url, _seen) = spawn_server().await;

    let err = gateway(&url)
        .submit_move(&GameId::from(104), 7)
        .await
        .expect_err("Move should be rejected");

    assert_eq!(
        err.kind,
        GatewayErrorKind::Rejected {
            status: 400,
            message: "Column not available".to_string()
        }
    );
}

#[tokio::test]
async fn test_unparseable_body_is_malformed() {
    let (url, _seen) = spawn_server().await;

    let err = gateway(&url)
        .submit_move(&GameId::from("garbage"), 1)
        .await
        .expect_err("Body should not parse");

    assert!(matches!(err.kind, GatewayErrorKind::Malformed(_)));
}

#[tokio::test]
async fn test_invalid_board_is_protocol_error() {
    let (url, _seen) = spawn_server().await;

    let err = gateway(&url)
        .submit_move(&GameId::from("broken"), 1)
        .await
        .expect_err("Board should be rejected");

    assert!(matches!(
        err.kind,
        GatewayErrorKind::Protocol(StateViolation::DuplicateCell(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Bind failed");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);

    let err = gateway(&format!("http://{}/", addr))
        .fetch_state(&GameId::from(1))
        .await
        .expect_err("Nothing is listening");

    assert!(matches!(err.kind, GatewayErrorKind::Transport(_)));
}
