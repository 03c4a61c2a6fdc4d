//! Tests for API URL construction.

use connect_four_client::{ApiRoutes, Difficulty, GameId, GatewayErrorKind};

fn routes() -> ApiRoutes {
    ApiRoutes::from_origin("http://localhost:9876/new-game?player=1#top").expect("Valid URL")
}

#[test]
fn test_base_is_origin_only() {
    assert_eq!(routes().base().as_str(), "http://localhost:9876/");
}

#[test]
fn test_default_port_is_omitted() {
    let routes = ApiRoutes::from_origin("https://example.com:443/play").expect("Valid URL");
    assert_eq!(routes.base().as_str(), "https://example.com/");
}

#[test]
fn test_new_game_url() {
    let routes = routes();
    assert_eq!(
        routes.new_game(None).as_str(),
        "http://localhost:9876/api/game"
    );
    assert_eq!(
        routes.new_game(Some(&Difficulty::new("easy"))).as_str(),
        "http://localhost:9876/api/game?difficulty=easy"
    );
}

#[test]
fn test_make_move_url() {
    assert_eq!(
        routes().make_move(&GameId::from(104), 2).as_str(),
        "http://localhost:9876/api/game/104?col=2"
    );
}

#[test]
fn test_reset_game_url() {
    assert_eq!(
        routes().reset_game(&GameId::from(104)).as_str(),
        "http://localhost:9876/api/game/reset/104"
    );
}

#[test]
fn test_game_state_url() {
    assert_eq!(
        routes().game_state(&GameId::from("abc")).as_str(),
        "http://localhost:9876/api/game/abc"
    );
}

#[test]
fn test_text_id_is_percent_encoded() {
    assert_eq!(
        routes().game_state(&GameId::from("a b/c")).as_str(),
        "http://localhost:9876/api/game/a%20b%2Fc"
    );
}

#[test]
fn test_invalid_url_is_rejected() {
    let err = ApiRoutes::from_origin("not a url").expect_err("Should not parse");
    assert!(matches!(err.kind, GatewayErrorKind::Url(_)));

    let err = ApiRoutes::from_origin("data:text/plain,hello").expect_err("Opaque origin");
    assert!(matches!(err.kind, GatewayErrorKind::Url(_)));
}

#[test]
fn test_non_canonical_numeric_id_is_kept_verbatim() {
    assert_eq!(GameId::from("007"), GameId::Text("007".to_string()));
    assert_eq!(GameId::from("+5"), GameId::Text("+5".to_string()));
    assert_eq!(GameId::from("104"), GameId::Number(104));
    assert_eq!(
        routes().game_state(&GameId::from("007")).as_str(),
        "http://localhost:9876/api/game/007"
    );
}
