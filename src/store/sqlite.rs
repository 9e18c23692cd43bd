//! SQLite preference backend
//!
//! One table, one row per key. Every `set` is its own statement, so a write
//! is durable once the call returns.

use crate::store::{KeyValueStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name of the preference database inside the data directory
pub const DATABASE_FILE: &str = "preferences.db";

/// Durable key-value store backed by SQLite
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Create or open the preference database in `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(DATABASE_FILE);

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = FULL;
            ",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!(path = ?path, "Opened preference store");

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| StoreError::Lock(e.to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM preferences WHERE key = ?", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = SqliteStore::open(dir.path()).unwrap();
            store.set("token", "tok123").unwrap();
            store.set("language", "en").unwrap();
        }

        let store = SqliteStore::open(dir.path()).unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("tok123"));
        assert_eq!(store.get("language").unwrap().as_deref(), Some("en"));
        assert_eq!(store.path(), dir.path().join(DATABASE_FILE));
    }

    #[test]
    fn test_overwrite_and_remove() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(dir.path()).unwrap();

        assert_eq!(store.get("darkMode").unwrap(), None);

        store.set("darkMode", "true").unwrap();
        store.set("darkMode", "false").unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));

        store.remove("darkMode").unwrap();
        assert_eq!(store.get("darkMode").unwrap(), None);
        store.remove("darkMode").unwrap();
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = SqliteStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join(DATABASE_FILE).exists());
    }
}
