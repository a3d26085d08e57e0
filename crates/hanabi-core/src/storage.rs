use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::HanabiError;
use crate::settings::SettingsBackend;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_kv_store.sql");

/// SQLite-backed key-value store for persisted client state.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, HanabiError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, HanabiError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>, HanabiError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Insert or replace the value under `key`.
    pub fn put(&self, key: &str, value: &str) -> Result<(), HanabiError> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}

impl SettingsBackend for Storage {
    fn read(&self, key: &str) -> Result<Option<String>, HanabiError> {
        self.get(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), HanabiError> {
        self.put(key, value)
    }
}

/// Run schema migrations using `PRAGMA user_version` for version tracking.
fn run_migrations(conn: &Connection) -> Result<(), HanabiError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}
