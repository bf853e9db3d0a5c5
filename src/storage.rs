//! Local persistence for finished reframe results.
//!
//! Every applied dialogue is one row in a single `SQLite` file:
//!
//! ```text
//! <root>/
//!   results.sqlite   # one row per applied result, transcript as JSON
//! ```

mod results;

use std::{fs, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("result not found: {0}")]
    NotFound(Uuid),

    #[error("result already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("corrupt result row: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS result (
    id          TEXT PRIMARY KEY,
    challenge   TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    reframe     TEXT NOT NULL,
    shift       TEXT NOT NULL,
    tag         TEXT NOT NULL,
    transcript  TEXT NOT NULL
);
";

/// `SQLite`-backed store for applied results.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory and database schema are created if they don't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let storage = Self { root };
        storage.open_db()?;
        Ok(storage)
    }

    /// Returns the default storage root: `~/.reframe/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".reframe"))
    }

    fn db_path(&self) -> PathBuf {
        self.root.join("results.sqlite")
    }

    fn open_db(&self) -> Result<Connection> {
        let conn = Connection::open(self.db_path())?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }
}
