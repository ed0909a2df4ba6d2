use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;

pub const DB_PATH_ENV: &str = "FILEKEEP_DB_PATH";
const DB_FILE_NAME: &str = "filekeep.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u64,
    pub search_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Defaults, with the database path overridable via `FILEKEEP_DB_PATH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var(DB_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            config.db_path = PathBuf::from(path);
        }
        config
    }

    /// Reads a JSON config file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, VaultError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("dev", "filekeep", "filekeep")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}
