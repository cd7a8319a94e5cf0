//! Tests for configuration loading and graceful degradation
//!
//! Missing config files fall back to compiled defaults rather than
//! terminating; environment variables override file values.
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate VERITAS_* variables are marked with #[serial].

use serial_test::serial;
use std::env;
use std::io::Write;
use veritas_common::config::EngineConfig;

fn clear_veritas_env() {
    env::remove_var("VERITAS_CONFIG");
    env::remove_var("VERITAS_AGENT_INTERVAL_SECS");
    env::remove_var("VERITAS_TICK_BACKOFF_SECS");
    env::remove_var("VERITAS_LOG_CAPACITY");
}

#[test]
fn compiled_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.agent_interval_secs, 5.0);
    assert_eq!(config.tick_backoff_secs, 1.0);
    assert_eq!(config.log_capacity, 100);
    assert_eq!(config.language_default, "en");
}

#[test]
#[serial]
fn load_without_file_uses_defaults() {
    clear_veritas_env();
    // Point VERITAS_CONFIG nowhere so a developer machine's real config
    // cannot leak into the test; an empty TOML file parses to defaults.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::File::create(&path).unwrap();
    env::set_var("VERITAS_CONFIG", &path);

    let config = EngineConfig::load(None).unwrap();
    assert_eq!(config.log_capacity, 100);

    clear_veritas_env();
}

#[test]
#[serial]
fn load_partial_toml_file() {
    clear_veritas_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "agent_interval_secs = 0.5").unwrap();
    writeln!(file, "log_capacity = 25").unwrap();

    let config = EngineConfig::load(Some(&path)).unwrap();
    assert_eq!(config.agent_interval_secs, 0.5);
    assert_eq!(config.log_capacity, 25);
    // Unspecified fields keep defaults
    assert_eq!(config.tick_backoff_secs, 1.0);

    clear_veritas_env();
}

#[test]
#[serial]
fn env_overrides_file_values() {
    clear_veritas_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "log_capacity = 25").unwrap();

    env::set_var("VERITAS_LOG_CAPACITY", "7");
    let config = EngineConfig::load(Some(&path)).unwrap();
    assert_eq!(config.log_capacity, 7);

    clear_veritas_env();
}

#[test]
#[serial]
fn malformed_env_override_is_a_config_error() {
    clear_veritas_env();
    env::set_var("VERITAS_LOG_CAPACITY", "many");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::File::create(&path).unwrap();

    let err = EngineConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("VERITAS_LOG_CAPACITY"));

    clear_veritas_env();
}

#[test]
#[serial]
fn zero_capacity_rejected() {
    clear_veritas_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "log_capacity = 0").unwrap();

    assert!(EngineConfig::load(Some(&path)).is_err());

    clear_veritas_env();
}
