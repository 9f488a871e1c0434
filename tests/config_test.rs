use std::collections::HashMap;

use sporltui::config::{Config, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REDIRECT_URI};
use sporltui::error::ConfigError;
use tempfile::tempdir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn valid_config() -> Config {
    Config {
        client_id: "abc".to_string(),
        client_secret: "xyz".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_missing_config_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.json"))
        .await
        .unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.login_timeout().as_secs(), 300);
}

#[tokio::test]
async fn test_partial_config_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "client_id": "abc", "client_secret": "xyz", "redirect_uri": "http://127.0.0.1:9999/callback" }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).await.unwrap();

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.client_secret, "xyz");
    assert_eq!(config.redirect_uri, "http://127.0.0.1:9999/callback");
    assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "client_id = abc").unwrap();

    let err = Config::load_from(&path).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sub").join("config.json");
    let config = valid_config();

    config.save_to(&path).await.unwrap();

    assert_eq!(Config::load_from(&path).await.unwrap(), config);
}

#[test]
fn test_spotify_env_overrides_file_values() {
    let mut config = Config {
        client_id: "from-file".to_string(),
        client_secret: "file-secret".to_string(),
        ..Config::default()
    };

    config.apply_overrides(env_of(&[
        ("SPOTIFY_CLIENT_ID", "from-env"),
        ("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:7777/callback"),
        ("CLIENT_SECRET", "ignored"),
    ]));

    assert_eq!(config.client_id, "from-env");
    assert_eq!(config.client_secret, "file-secret");
    assert_eq!(config.redirect_uri, "http://127.0.0.1:7777/callback");
}

#[test]
fn test_plain_env_only_fills_empty_fields() {
    let mut config = Config::default();

    config.apply_overrides(env_of(&[("CLIENT_ID", "abc"), ("CLIENT_SECRET", "xyz")]));

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.client_secret, "xyz");
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config = valid_config();

    config.apply_overrides(env_of(&[("SPOTIFY_CLIENT_ID", ""), ("SPOTIFY_CLIENT_SECRET", "  ")]));

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.client_secret, "xyz");
}

#[test]
fn test_validate_requires_client_credentials() {
    let missing_secret = Config {
        client_id: "abc".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        missing_secret.validate(),
        Err(ConfigError::Invalid(_))
    ));

    let missing_id = Config {
        client_secret: "xyz".to_string(),
        ..Config::default()
    };
    assert!(matches!(missing_id.validate(), Err(ConfigError::Invalid(_))));

    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_redirect_uri() {
    let not_a_url = Config {
        redirect_uri: "not a url".to_string(),
        ..valid_config()
    };
    assert!(matches!(not_a_url.validate(), Err(ConfigError::Invalid(_))));

    let https = Config {
        redirect_uri: "https://127.0.0.1:8080/callback".to_string(),
        ..valid_config()
    };
    assert!(matches!(https.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_intervals() {
    let config = Config {
        poll_interval_ms: 0,
        ..valid_config()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
