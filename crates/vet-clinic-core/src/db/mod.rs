//! Database layer for vet-clinic.
//!
//! Every repository call opens its own connection through the
//! [`ConnectionProvider`] held by [`Database`] and drops it before
//! returning. Nothing is cached between calls.

mod appointments;
mod clients;
mod config;
mod pets;
mod repository;
mod schema;
mod veterinarians;

pub use appointments::*;
pub use clients::*;
pub use config::*;
pub use pets::*;
pub use repository::*;
pub use schema::*;
pub use veterinarians::*;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode, OpenFlags};
use thiserror::Error;
use tracing::debug;

use crate::models::ValidationError;

/// Database errors. Any of these is a storage failure for the caller.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored row failed validation: {0}")]
    InvalidRow(#[from] ValidationError),

    #[error("Sequence not found: {0}")]
    SequenceMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Result of a write that reached the store.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The statement ran and was committed.
    Committed,
    /// No row has the given id.
    NotFound,
    /// The store rejected the write: duplicate key, missing parent row,
    /// or dependent rows still present.
    IntegrityViolation(String),
}

impl WriteOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, WriteOutcome::Committed)
    }
}

/// Extract the message of a constraint failure, if `err` is one.
pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            Some(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => None,
    }
}

/// Source of fresh connections to one store.
pub trait ConnectionProvider: Send + Sync {
    /// Open a new connection.
    fn open(&self) -> rusqlite::Result<Connection>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// SQLite database file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConnectionProvider for FileStore {
    fn open(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Named shared-cache in-memory database.
///
/// An idle anchor connection keeps the data alive while per-call
/// connections come and go.
pub struct SharedMemoryStore {
    uri: String,
    _anchor: Mutex<Connection>,
}

impl SharedMemoryStore {
    pub fn new() -> rusqlite::Result<Self> {
        let uri = format!(
            "file:vet-clinic-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        let anchor = open_uri(&uri)?;
        Ok(Self {
            uri,
            _anchor: Mutex::new(anchor),
        })
    }
}

fn open_uri(uri: &str) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(uri, OpenFlags::default() | OpenFlags::SQLITE_OPEN_URI)
}

impl ConnectionProvider for SharedMemoryStore {
    fn open(&self) -> rusqlite::Result<Connection> {
        open_uri(&self.uri)
    }

    fn describe(&self) -> String {
        self.uri.clone()
    }
}

/// Storage handle injected into repositories.
pub struct Database {
    provider: Box<dyn ConnectionProvider>,
    config: StoreConfig,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open_with_config(StoreConfig::new(path))
    }

    /// Open the file named by `config`.
    pub fn open_with_config(config: StoreConfig) -> DbResult<Self> {
        let provider = FileStore::new(&config.path);
        Self::with_provider(provider, config)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_provider(SharedMemoryStore::new()?, StoreConfig::default())
    }

    /// Use a custom connection source. The schema is created on the first
    /// connection.
    pub fn with_provider<P>(provider: P, config: StoreConfig) -> DbResult<Self>
    where
        P: ConnectionProvider + 'static,
    {
        let db = Self {
            provider: Box::new(provider),
            config,
        };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        debug!(store = %self.provider.describe(), "schema initialized");
        Ok(())
    }

    /// Open a connection with foreign keys enforced.
    pub fn connect(&self) -> DbResult<Connection> {
        let conn = self.provider.open()?;
        conn.busy_timeout(self.config.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Round-trip to the store; returns its current date.
    pub fn ping(&self) -> DbResult<NaiveDate> {
        let conn = self.connect()?;
        let today = conn.query_row("SELECT date('now')", [], |row| row.get(0))?;
        Ok(today)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connect().unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"clients".to_string()));
        assert!(tables.contains(&"pets".to_string()));
        assert!(tables.contains(&"veterinarians".to_string()));
        assert!(tables.contains(&"appointments".to_string()));
        assert!(tables.contains(&"sequences".to_string()));
    }

    #[test]
    fn test_in_memory_data_survives_between_connections() {
        let db = Database::open_in_memory().unwrap();
        db.connect()
            .unwrap()
            .execute("UPDATE sequences SET value = 41 WHERE name = 'clients'", [])
            .unwrap();

        let value: i64 = db
            .connect()
            .unwrap()
            .query_row("SELECT value FROM sequences WHERE name = 'clients'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, 41);
    }

    #[test]
    fn test_in_memory_databases_are_isolated() {
        let a = Database::open_in_memory().unwrap();
        let b = Database::open_in_memory().unwrap();
        a.connect()
            .unwrap()
            .execute("UPDATE sequences SET value = 9 WHERE name = 'pets'", [])
            .unwrap();

        let value: i64 = b
            .connect()
            .unwrap()
            .query_row("SELECT value FROM sequences WHERE name = 'pets'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn test_foreign_keys_enabled_per_connection() {
        let db = Database::open_in_memory().unwrap();
        let enabled: i64 = db
            .connect()
            .unwrap()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_ping() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.ping().is_ok());
    }

    #[test]
    fn test_write_outcome() {
        assert!(WriteOutcome::Committed.is_committed());
        assert!(!WriteOutcome::NotFound.is_committed());
        assert!(!WriteOutcome::IntegrityViolation("fk".into()).is_committed());
    }
}
