//! Unit tests for configuration loading and API key resolution
//!
//! Tests cover:
//! - Missing default TOML file falls back to compiled defaults
//! - Explicit TOML file must exist and parse
//! - Partial TOML files keep defaults for omitted fields
//! - API key validity (blank and placeholder keys rejected)
//! - API key priority: environment over TOML
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate GROQ_API_KEY or XDG_CONFIG_HOME are marked with
//! #[serial] so they run sequentially, not in parallel.

use biztone_common::config::{
    is_valid_key, resolve_api_key, resolve_api_key_from_env, ApiKeySource, TomlConfig,
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_BODY_BYTES, DEFAULT_MODEL, DEFAULT_PORT,
    PLACEHOLDER_API_KEY,
};
use biztone_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Should write config file");
    path
}

// =============================================================================
// TOML Loading
// =============================================================================

#[test]
fn test_defaults() {
    let config = TomlConfig::default();

    assert_eq!(config.groq_api_key, None);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    assert!(config.server.max_body_bytes >= 16 * 1024 * 1024);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.error_log, PathBuf::from("error_debug.log"));
    assert_eq!(config.completion.model, DEFAULT_MODEL);
    assert_eq!(config.completion.base_url, DEFAULT_BASE_URL);
    assert!((config.completion.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.completion.max_tokens, 500);
    assert_eq!(config.completion.timeout_secs, 30);
}

#[test]
fn test_explicit_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
groq_api_key = "gsk_from_toml"

[server]
host = "0.0.0.0"
port = 8080
max_body_bytes = 65536

[logging]
level = "debug"
error_log = "/var/log/biztone/errors.log"

[completion]
model = "llama-3.1-8b-instant"
base_url = "http://localhost:9000/v1"
temperature = 0.2
max_tokens = 256
timeout_secs = 5
"#,
    );

    let loaded = TomlConfig::load(Some(&path)).expect("Should load explicit config");
    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));

    let config = loaded.config;
    assert_eq!(config.groq_api_key.as_deref(), Some("gsk_from_toml"));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 65536);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.error_log,
        PathBuf::from("/var/log/biztone/errors.log")
    );
    assert_eq!(config.completion.model, "llama-3.1-8b-instant");
    assert_eq!(config.completion.base_url, "http://localhost:9000/v1");
    assert_eq!(config.completion.max_tokens, 256);
    assert_eq!(config.completion.timeout_secs, 5);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 6000\n");

    let config = TomlConfig::load(Some(&path)).unwrap().config;

    assert_eq!(config.server.port, 6000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    assert_eq!(config.completion.model, DEFAULT_MODEL);
    assert_eq!(config.groq_api_key, None);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = TomlConfig::load(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server\nport = \"not a port\"");

    let result = TomlConfig::load(Some(&path));
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_missing_default_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let loaded = TomlConfig::load(None).expect("Missing default config must not error");
    assert!(loaded.path.is_none());
    assert_eq!(loaded.config, TomlConfig::default());

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("biztone");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[server]\nport = 7001\n").unwrap();

    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let loaded = TomlConfig::load(None).unwrap();
    assert_eq!(loaded.path, Some(config_dir.join("config.toml")));
    assert_eq!(loaded.config.server.port, 7001);

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }
}

// =============================================================================
// API Key Resolution
// =============================================================================

#[test]
fn test_key_validity() {
    assert!(is_valid_key("gsk_abc123"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("   "));
    assert!(!is_valid_key(PLACEHOLDER_API_KEY));
    assert!(!is_valid_key("  your_groq_api_key_here \n"));
}

#[test]
fn test_env_key_wins_over_toml() {
    let toml = TomlConfig {
        groq_api_key: Some("gsk_toml".to_string()),
        ..Default::default()
    };

    let resolved = resolve_api_key(Some("gsk_env".to_string()), &toml).unwrap();
    assert_eq!(resolved.key, "gsk_env");
    assert_eq!(resolved.source, ApiKeySource::Environment);
}

#[test]
fn test_placeholder_env_key_falls_through_to_toml() {
    let toml = TomlConfig {
        groq_api_key: Some("gsk_toml".to_string()),
        ..Default::default()
    };

    let resolved = resolve_api_key(Some(PLACEHOLDER_API_KEY.to_string()), &toml).unwrap();
    assert_eq!(resolved.key, "gsk_toml");
    assert_eq!(resolved.source, ApiKeySource::TomlConfig);
}

#[test]
fn test_no_valid_key_anywhere() {
    let toml = TomlConfig {
        groq_api_key: Some(" ".to_string()),
        ..Default::default()
    };

    assert!(resolve_api_key(None, &toml).is_none());
    assert!(resolve_api_key(Some(PLACEHOLDER_API_KEY.to_string()), &toml).is_none());
}

#[test]
fn test_key_is_trimmed() {
    let resolved = resolve_api_key(Some("  gsk_padded\n".to_string()), &TomlConfig::default());
    assert_eq!(resolved.unwrap().key, "gsk_padded");
}

#[test]
fn test_debug_output_redacts_key() {
    let resolved = resolve_api_key(Some("gsk_secret".to_string()), &TomlConfig::default()).unwrap();
    let debug = format!("{:?}", resolved);
    assert!(!debug.contains("gsk_secret"));
    assert!(debug.contains("redacted"));
}

#[test]
#[serial]
fn test_resolve_from_process_environment() {
    let previous = env::var_os(API_KEY_ENV);

    env::set_var(API_KEY_ENV, "gsk_process_env");
    let resolved = resolve_api_key_from_env(&TomlConfig::default()).unwrap();
    assert_eq!(resolved.key, "gsk_process_env");

    env::remove_var(API_KEY_ENV);
    assert!(resolve_api_key_from_env(&TomlConfig::default()).is_none());

    if let Some(value) = previous {
        env::set_var(API_KEY_ENV, value);
    }
}
