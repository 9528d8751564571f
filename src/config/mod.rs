//! TOML-based configuration
//!
//! Example configuration (`sharecurve.toml`):
//! ```toml
//! [dataset]
//! path = "data/ipsos.csv"
//! delimiter = ","
//!
//! [dataset.aliases]
//! "Period" = "Quarter"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8050
//! session_idle_secs = 1800
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::parser::{ColumnAliases, ReadOptions};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sharecurve.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Input table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Path to the CSV input table.
    pub path: Option<PathBuf>,

    /// Single-character field delimiter.
    pub delimiter: String,

    /// Extra header aliases, source header -> canonical column.
    pub aliases: BTreeMap<String, String>,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: ",".to_string(),
            aliases: BTreeMap::new(),
        }
    }
}

impl DatasetSettings {
    /// Reader options: built-in aliases extended with the configured ones.
    pub fn read_options(&self) -> Result<ReadOptions, SettingsError> {
        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(SettingsError::InvalidConfig(format!(
                    "delimiter must be a single byte, got {:?}",
                    self.delimiter
                )))
            }
        };
        let aliases = ColumnAliases::default().extend(self.aliases.clone());
        Ok(ReadOptions::default()
            .with_delimiter(delimiter)
            .with_aliases(aliases))
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Seconds a session may stay unused before it is dropped; 0 keeps sessions forever.
    pub session_idle_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            session_idle_secs: 1800,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle time after which a session is evicted, if eviction is enabled
    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a specific file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `sharecurve.toml` from the working directory, or defaults if it is absent.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.dataset.read_options()?;
        Ok(settings)
    }
}
