//! SQLite-based storage implementation

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{SessionStorage, StoreResult};
use crate::error::ServerError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite-backed key-value storage
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, ServerError> {
        let conn = Connection::open(path).map_err(|e| ServerError::Storage(e.to_string()))?;

        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ServerError::Storage("connection lock poisoned".to_string()))
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), ServerError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| ServerError::Storage(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, ServerError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| ServerError::Storage(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| ServerError::Storage(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), ServerError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| ServerError::Storage(e.to_string()))?;

        Ok(())
    }
}

impl SessionStorage for SqliteStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;

        conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::Storage(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(|e| ServerError::Storage(e.to_string()))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.lock()?;

        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| ServerError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let store = SqliteStorage::open(path.to_str().unwrap()).unwrap();
        (store, dir) // Return dir to keep it alive
    }

    #[test]
    fn test_set_get_remove() {
        let (store, _dir) = create_test_store();

        assert!(store.get("demo.user").unwrap().is_none());

        store.set("demo.user", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("demo.user").unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.remove("demo.user").unwrap();
        assert!(store.get("demo.user").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let (store, _dir) = create_test_store();

        store.set("demo.user", "first").unwrap();
        store.set("demo.user", "second").unwrap();

        assert_eq!(store.get("demo.user").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_missing_key() {
        let (store, _dir) = create_test_store();
        assert!(store.remove("demo.user").is_ok());
    }

    #[test]
    fn test_migration_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let path = path.to_str().unwrap();

        let store = SqliteStorage::open(path).unwrap();
        store.set("demo.user", "kept").unwrap();
        drop(store);

        let reopened = SqliteStorage::open(path).unwrap();
        assert_eq!(reopened.get("demo.user").unwrap().as_deref(), Some("kept"));

        let conn = reopened.lock().unwrap();
        let version = SqliteStorage::get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
