//! Tests for client configuration loading.

use std::io::Write;
use std::time::Duration;

use connect_four_client::{ClientConfig, Difficulty};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server_url(), "http://localhost:4000/");
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.difficulties(), &vec![Difficulty::new("easy")]);
}

#[test]
fn test_from_file_overrides_and_fills_defaults() {
    let file = write_config(
        r#"
server_url = "http://games.local:9876/"
difficulties = ["easy", "hard"]
"#,
    );

    let config = ClientConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.server_url(), "http://games.local:9876/");
    assert_eq!(config.difficulties().len(), 2);
    assert_eq!(*config.request_timeout_secs(), 10);
}

#[test]
fn test_zero_timeout_is_rejected() {
    let file = write_config("request_timeout_secs = 0\n");
    let err = ClientConfig::from_file(file.path()).expect_err("Should be rejected");
    assert!(err.message.contains("request_timeout_secs"));
}

#[test]
fn test_empty_difficulties_is_rejected() {
    let file = write_config("difficulties = []\n");
    assert!(ClientConfig::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_toml_is_rejected() {
    let file = write_config("server_url = \n");
    let err = ClientConfig::from_file(file.path()).expect_err("Should not parse");
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config =
        ClientConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_server_url_override() {
    let config = ClientConfig::default().with_server_url("http://other:1/".to_string());
    assert_eq!(config.server_url(), "http://other:1/");
}
