use crate::{
    error::{Result, TaskboardError},
    storage::{validate_key, Storage},
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

/// SQLite-based storage: a single `kv` table keyed by storage key
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

fn sqlite_error(err: rusqlite::Error) -> TaskboardError {
    TaskboardError::Persistence(err.to_string())
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `database_path`
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        let connection = Connection::open(database_path).map_err(sqlite_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// A private database that disappears with this instance
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(sqlite_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        let conn = self.connection.lock().await;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(sqlite_error)?;
        debug!("sqlite storage initialized");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let conn = self.connection.lock().await;
        conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(sqlite_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.connection.lock().await;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(sqlite_error)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.connection.lock().await;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(sqlite_error)?;
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        let conn = self.connection.lock().await;
        conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map(|count| count > 0)
        .unwrap_or(false)
    }
}
