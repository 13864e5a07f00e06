use std::env;
use std::path::PathBuf;

use crate::storage::StorageError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "QUADRAS_DATA_DIR";
/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "QUADRAS_LOG";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root for files the app writes (currently only logs).
    pub data_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `quadras=debug`.
    pub log_filter: String,
}

impl Config {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Without `QUADRAS_DATA_DIR` the platform data directory is used
    /// (`~/.local/share/quadras` on Linux).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(StorageError::NoDataDir)?
                .join("quadras"),
        };
        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "info".to_string());
        Ok(Self {
            data_dir,
            log_filter,
        })
    }

    /// Directory that receives the rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
