//! Tests for loading game configs and post fixtures from disk.

use std::fs;
use tempfile::TempDir;

use tweet_guess::{AccountHandle, FixtureSource, GameConfig, RoundEngine};

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("game.toml");
    fs::write(
        &path,
        r#"
api_url = "http://localhost:8080/timeline.json"
include_reposts = true
max_items = 200
"#,
    )
    .expect("Failed to write TOML");

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.api_url(), "http://localhost:8080/timeline.json");
    assert!(*config.fetch_request().include_reposts());
    assert_eq!(*config.fetch_request().max_items(), 200);
}

#[test]
fn test_config_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_config_unknown_type_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "max_items = \"lots\"").expect("Failed to write TOML");

    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[tokio::test]
async fn test_fixture_file_drives_a_game() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("posts.toml");
    fs::write(
        &path,
        r#"
[accounts]
kanyewest = ["I love sleep", "thanks @everyone", "album out https://t.co/abc"]
elonmusk = ["Mars soon", "I love sleep"]
"#,
    )
    .expect("Failed to write TOML");

    let source = FixtureSource::from_file(&path).expect("Load failed");
    let config = GameConfig::default().with_seed(1);
    let mut engine = RoundEngine::create(
        &source,
        AccountHandle::from("kanyewest"),
        AccountHandle::from("elonmusk"),
        &config.fetch_request(),
        &config.post_filter(),
        *config.seed(),
    )
    .await
    .expect("Engine failed");

    // Same text from two authors is two distinct posts.
    assert_eq!(engine.initial_pool_size(), 3);

    let mut rounds = 0;
    while engine.play_round("elonmusk").is_ok() {
        rounds += 1;
    }
    assert_eq!(rounds, 3);
    assert_eq!(*engine.summary().score(), 2);
}

#[test]
fn test_fixture_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(FixtureSource::from_file(dir.path().join("absent.toml")).is_err());
}
