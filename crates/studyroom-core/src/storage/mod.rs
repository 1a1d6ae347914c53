mod config;
pub mod database;
pub mod memory;

pub use config::{Config, StudyConfig, TimerConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StorageError};

/// Record keys used by the statistics engine.
pub mod keys {
    pub const SESSIONS: &str = "sessions";
    pub const USER_STATS: &str = "user_stats";
    pub const TASKS: &str = "tasks";
    pub const ACTIVITIES: &str = "activities";
    pub const RESOURCES: &str = "resources";
    pub const SCHEDULE: &str = "schedule";
    pub const USER_PROFILE: &str = "user_profile";
}

/// Persistence adapter: a string-keyed store of JSON documents.
///
/// Implementations report failures honestly; the typed [`load`] and [`save`]
/// helpers are where those failures are absorbed.
pub trait Store {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: Store + ?Sized> Store for &T {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<T: Store + ?Sized> Store for Rc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Load a record, falling back to `T::default()` when it is missing,
/// unreadable or malformed.
pub fn load<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed record, using default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, using default");
            T::default()
        }
    }
}

/// Persist a record. Failures are logged and otherwise ignored.
pub fn save<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to serialize record");
            return;
        }
    };
    if let Err(e) = store.write(key, &raw) {
        tracing::error!(key, error = %e, "store write failed");
    }
}

/// Returns the data directory, creating it if needed.
///
/// `STUDYROOM_DATA_DIR` wins when set. Otherwise `~/.config/studyroom/`, or
/// `~/.config/studyroom-dev/` with `STUDYROOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYROOM_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyroom-dev")
            } else {
                base_dir.join("studyroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
