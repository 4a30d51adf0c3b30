//! SQLite-backed key-value store.
//!
//! Holds the persisted configuration, text mirror and scheduler records,
//! one JSON document per key.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::state::KvStore;
use crate::error::{DatabaseError, Result};

/// SQLite database with a single `kv` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/break-scheduler/break-scheduler.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("break-scheduler.db"))
    }

    /// Open (or create) a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for Database {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// All records land in one transaction, so a reader never sees a
    /// half-written snapshot.
    fn kv_set_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
