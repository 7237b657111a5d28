use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lingo_core::TargetLanguage;
use lingo_engine::{HostSettings, SUMMARY_CONTEXT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "lingo.ron";
const CONFIG_ENV: &str = "LINGO_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// App settings read from `lingo.ron`. Every field has a default, so a missing
/// file or a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host_url: String,
    pub connect_timeout_secs: u64,
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub default_target_language: String,
    pub summary_context: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_url: HostSettings::default().base_url,
            connect_timeout_secs: 5,
            storage_dir: PathBuf::from(".lingo"),
            storage_key: "messages".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./lingo.log"),
            default_target_language: TargetLanguage::default().code().to_string(),
            summary_context: SUMMARY_CONTEXT.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads from `$LINGO_CONFIG`, falling back to `./lingo.ron`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn host_settings(&self) -> HostSettings {
        HostSettings {
            base_url: self.host_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..HostSettings::default()
        }
    }

    /// Configured target language, if it is one the picker offers.
    pub fn target_language(&self) -> Option<TargetLanguage> {
        TargetLanguage::from_code(&self.default_target_language)
    }
}
