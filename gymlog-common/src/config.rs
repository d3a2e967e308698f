//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from `gymlog.toml` in the root folder; a
//! missing file degrades to built-in defaults with a warning, it never
//! terminates startup. Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. `GYMLOG_ROOT_FOLDER` environment variable
//! 3. OS-dependent compiled default

use crate::publish::DEFAULT_CHANNEL;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bootstrap config filename under the root folder
pub const CONFIG_FILENAME: &str = "gymlog.toml";

/// SQLite database filename under the root folder
pub const DATABASE_FILENAME: &str = "gymlog.db";

const ROOT_FOLDER_ENV: &str = "GYMLOG_ROOT_FOLDER";

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Owner-scoped SQLite tables (multi-user)
    #[default]
    Sqlite,
    /// Flat CSV + options files in the root folder (single-user)
    File,
}

/// Bootstrap configuration loaded from TOML
///
/// These settings cannot change while running; restart to pick up edits.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageToml,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub channel: ChannelToml,

    /// Credentials file enabling multi-user authentication (optional)
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            storage: StorageToml::default(),
            port: default_port(),
            logging: LoggingConfig::default(),
            channel: ChannelToml::default(),
            credentials_file: None,
        }
    }
}

/// Storage section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageToml {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file path; default is `gymlog.db` under the root folder
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Outbound channel section
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelToml {
    /// Broker base URL; publishing is disabled when unset
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_channel_name")]
    pub name: String,
}

impl Default for ChannelToml {
    fn default() -> Self {
        Self {
            url: None,
            name: default_channel_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5780
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL.to_string()
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Config file the values came from, if one existed
    pub config_file: Option<PathBuf>,
    pub root_folder: PathBuf,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_path: PathBuf,
    pub channel_url: Option<String>,
    pub channel_name: String,
    pub credentials_file: Option<PathBuf>,
    pub log_level: String,
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `gymlog.toml` under the root folder
    ///
    /// A missing file falls back to defaults; a malformed file is an error.
    pub fn load(root_folder: PathBuf, overrides: ConfigOverrides) -> Result<Self> {
        let config_path = root_folder.join(CONFIG_FILENAME);
        let (config_file, toml_config) = if config_path.exists() {
            let text = std::fs::read_to_string(&config_path)?;
            let parsed: TomlConfig = toml::from_str(&text).map_err(|e| {
                Error::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })?;
            info!("Loaded configuration from {}", config_path.display());
            (Some(config_path), parsed)
        } else {
            warn!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            (None, TomlConfig::default())
        };

        let port = overrides.port.unwrap_or(toml_config.port);
        let database_path = overrides
            .database_path
            .or(toml_config.storage.database_path)
            .unwrap_or_else(|| root_folder.join(DATABASE_FILENAME));

        // A relative credentials path is taken relative to the root folder
        let credentials_file = toml_config.credentials_file.map(|p| {
            if p.is_absolute() {
                p
            } else {
                root_folder.join(p)
            }
        });

        Ok(Config {
            config_file,
            root_folder,
            port,
            storage: toml_config.storage.backend,
            database_path,
            channel_url: toml_config.channel.url,
            channel_name: toml_config.channel.name,
            credentials_file,
            log_level: toml_config.logging.level,
        })
    }
}

/// Resolve the root folder from CLI > environment > platform default
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    get_default_root_folder()
}

/// OS-dependent default root folder
pub fn get_default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gymlog"))
        .unwrap_or_else(|| PathBuf::from("./gymlog_data"))
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_value() {
        assert_eq!(default_port(), 5780);
    }

    #[test]
    fn default_channel_is_gym() {
        assert_eq!(default_channel_name(), "GYM");
    }

    #[test]
    fn empty_toml_parses_to_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 5780);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.channel.url.is_none());
        assert_eq!(config.channel.name, "GYM");
        assert!(config.credentials_file.is_none());
    }

    #[test]
    fn full_toml_parses() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 8080
            credentials_file = "users.toml"

            [storage]
            backend = "file"

            [channel]
            url = "http://broker.local:7000"
            name = "GYM"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.channel.url.as_deref(), Some("http://broker.local:7000"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn default_root_folder_is_nonempty() {
        assert!(!get_default_root_folder().as_os_str().is_empty());
    }
}
