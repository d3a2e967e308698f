//! Unit tests for configuration and root folder resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate GYMLOG_ROOT_FOLDER are marked with #[serial] to ensure
//! they run sequentially, not in parallel.

use gymlog_common::config::{
    ensure_root_folder, get_default_root_folder, resolve_root_folder, Config, ConfigOverrides,
    StorageBackend, CONFIG_FILENAME,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
#[serial]
fn resolver_cli_argument_wins() {
    env::set_var("GYMLOG_ROOT_FOLDER", "/tmp/gymlog-env");
    let resolved = resolve_root_folder(Some(Path::new("/tmp/gymlog-cli")));
    env::remove_var("GYMLOG_ROOT_FOLDER");
    assert_eq!(resolved, PathBuf::from("/tmp/gymlog-cli"));
}

#[test]
#[serial]
fn resolver_env_variable_second() {
    env::set_var("GYMLOG_ROOT_FOLDER", "/tmp/gymlog-env");
    let resolved = resolve_root_folder(None);
    env::remove_var("GYMLOG_ROOT_FOLDER");
    assert_eq!(resolved, PathBuf::from("/tmp/gymlog-env"));
}

#[test]
#[serial]
fn resolver_falls_back_to_platform_default() {
    env::remove_var("GYMLOG_ROOT_FOLDER");
    let resolved = resolve_root_folder(None);
    assert_eq!(resolved, get_default_root_folder());
    assert!(!resolved.as_os_str().is_empty());
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path().to_path_buf(), ConfigOverrides::default()).unwrap();

    assert_eq!(config.port, 5780);
    assert_eq!(config.storage, StorageBackend::Sqlite);
    assert_eq!(config.database_path, dir.path().join("gymlog.db"));
    assert!(config.channel_url.is_none());
    assert_eq!(config.channel_name, "GYM");
    assert!(config.credentials_file.is_none());
}

#[test]
fn config_file_values_apply() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILENAME),
        r#"
        port = 6001
        credentials_file = "users.toml"

        [storage]
        backend = "file"

        [channel]
        url = "http://127.0.0.1:7000"
        "#,
    )
    .unwrap();

    let config = Config::load(dir.path().to_path_buf(), ConfigOverrides::default()).unwrap();
    assert_eq!(config.port, 6001);
    assert_eq!(config.storage, StorageBackend::File);
    assert_eq!(config.channel_url.as_deref(), Some("http://127.0.0.1:7000"));
    // Relative credentials path resolves under the root folder
    assert_eq!(config.credentials_file, Some(dir.path().join("users.toml")));
}

#[test]
fn cli_overrides_beat_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILENAME), "port = 6001").unwrap();

    let overrides = ConfigOverrides {
        port: Some(7002),
        database_path: Some(PathBuf::from("/tmp/other.db")),
    };
    let config = Config::load(dir.path().to_path_buf(), overrides).unwrap();
    assert_eq!(config.port, 7002);
    assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
}

#[test]
fn malformed_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILENAME), "port = \"not a number\"").unwrap();
    assert!(Config::load(dir.path().to_path_buf(), ConfigOverrides::default()).is_err());
}

#[test]
fn ensure_root_folder_creates_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    ensure_root_folder(&nested).unwrap();
    assert!(nested.is_dir());
    // Idempotent
    ensure_root_folder(&nested).unwrap();
}
