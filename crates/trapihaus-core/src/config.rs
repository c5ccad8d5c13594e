//! Where the session lives on disk.

use std::path::PathBuf;

use crate::storage::STORAGE_KEY;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TRAPIHAUS_DATA_DIR";

const DB_FILE: &str = "session.redb";
const LOGS_DIR: &str = "logs";

/// Settings needed to open a [`SessionGate`](crate::SessionGate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory holding the session database and logs
    pub data_dir: PathBuf,
    /// Key the sign-in flag is stored under
    pub storage_key: String,
}

impl SessionConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Use `TRAPIHAUS_DATA_DIR` if set and non-empty, else [`default_data_dir`].
    pub fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self::new(dir)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_DIR)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

/// Platform data directory for the app (e.g. `~/.local/share/trapihaus`).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trapihaus")
}
