//! Tests for config file loading and data root resolution
//!
//! Tests that touch LABNOTE_DATA_ROOT are marked #[serial] so they do not
//! race on the process environment.

use labnote_common::config::{resolve_data_root, TomlConfig, DATA_ROOT_ENV};
use labnote_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_empty_config_uses_defaults() {
    let config: TomlConfig = toml::from_str("").unwrap();

    assert!(config.data_root.is_none());
    assert!(config.port.is_none());
    assert_eq!(config.logging.level, "info");

    let seed = config.seed_users();
    assert_eq!(seed.len(), 1);
    assert_eq!(seed[0].user_id, "123");
    assert_eq!(seed[0].name, "Alice");
    assert_eq!(seed[0].role, "student");
}

#[test]
fn test_full_config_parses() {
    let config: TomlConfig = toml::from_str(
        r#"
        data_root = "/srv/labnote"
        host = "0.0.0.0"
        port = 8080

        [logging]
        level = "debug"

        [[seed_users]]
        user_id = "42"
        name = "Bob"
        role = "postdoc"
        email = "bob@example.org"
        "#,
    )
    .unwrap();

    assert_eq!(config.data_root, Some(PathBuf::from("/srv/labnote")));
    assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.logging.level, "debug");

    let seed = config.seed_users();
    assert_eq!(seed.len(), 1);
    assert_eq!(seed[0].email.as_deref(), Some("bob@example.org"));
}

#[test]
fn test_explicit_seed_list_may_be_empty() {
    let config: TomlConfig = toml::from_str("seed_users = []").unwrap();
    assert!(config.seed_users().is_empty());
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = TomlConfig::load_or_default(Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(matches!(TomlConfig::load(&path), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(DATA_ROOT_ENV, "/from/env");
    let config = TomlConfig {
        data_root: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let root = resolve_data_root(Some(Path::new("/from/cli")), &config);
    env::remove_var(DATA_ROOT_ENV);

    assert_eq!(root, PathBuf::from("/from/cli"));
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(DATA_ROOT_ENV, "/from/env");
    let config = TomlConfig {
        data_root: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let root = resolve_data_root(None, &config);
    env::remove_var(DATA_ROOT_ENV);

    assert_eq!(root, PathBuf::from("/from/env"));
}

#[test]
#[serial]
fn test_toml_used_without_env() {
    env::remove_var(DATA_ROOT_ENV);
    let config = TomlConfig {
        data_root: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    assert_eq!(resolve_data_root(None, &config), PathBuf::from("/from/toml"));
}

#[test]
#[serial]
fn test_default_when_nothing_configured() {
    env::remove_var(DATA_ROOT_ENV);
    let root = resolve_data_root(None, &TomlConfig::default());
    assert!(!root.as_os_str().is_empty());
}
