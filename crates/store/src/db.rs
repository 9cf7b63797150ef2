use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use duckdb::Connection;
use logbook_core::error::{LogbookError, Result};

use crate::schema::SCHEMA_SQL;

/// Handle to the DuckDB database holding the `logs` table.
///
/// Cloning is cheap; all clones share one connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl Store {
    pub fn open(path: &Path, threads: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LogbookError::Io(format!("failed to create db dir: {e}")))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| LogbookError::Store(format!("failed to open duckdb: {e}")))?;
        conn.execute_batch(&format!("PRAGMA threads={threads};"))
            .map_err(|e| LogbookError::Store(format!("failed to set pragmas: {e}")))?;

        Self::with_connection(conn, path.display().to_string())
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LogbookError::Store(format!("failed to open in-memory db: {e}")))?;
        Self::with_connection(conn, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, db_path: String) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| LogbookError::Store(format!("failed to initialize schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path,
        })
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }
}
