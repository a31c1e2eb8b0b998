//! Store configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{DbError, DbResult};

/// Environment variable naming the database file.
pub const DB_PATH_ENV: &str = "VET_CLINIC_DB";
/// Environment variable with the busy timeout in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "VET_CLINIC_BUSY_TIMEOUT_MS";

pub const DEFAULT_DB_PATH: &str = "vet_clinic.db";
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the store lives and how long a call may wait on a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Read `VET_CLINIC_DB` and `VET_CLINIC_BUSY_TIMEOUT_MS`.
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> DbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(BUSY_TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                DbError::Config(format!(
                    "{} must be a number of milliseconds, got {:?}",
                    BUSY_TIMEOUT_ENV, raw
                ))
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
