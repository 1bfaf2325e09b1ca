//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::{Result, SelectionStore};

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }
}

impl SelectionStore for Database {
    fn load_index(&self, key: &str) -> Result<Option<usize>> {
        let stored: Option<Value> = self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT selected_index FROM selection_state WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })?;

        // Anything but a non-negative integer counts as "nothing persisted".
        let index = match stored {
            Some(Value::Integer(raw)) => usize::try_from(raw).ok(),
            Some(other) => {
                tracing::warn!(key = %key, value = ?other, "Ignoring non-integer persisted selection");
                None
            }
            None => None,
        };

        Ok(index)
    }

    fn save_index(&self, key: &str, index: usize) -> Result<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let index = i64::try_from(index).map_err(|_| StorageError::InvalidKey(key.to_string()))?;
        let updated_at = Utc::now().to_rfc3339();

        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO selection_state (key, selected_index, updated_at)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![key, index, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, index, "Persisted selection");
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
