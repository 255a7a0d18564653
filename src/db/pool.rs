//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! A `DbPool` is constructed once per command and passed explicitly to every
//! component that needs the session store.

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file. Failure here means the store is unreachable.
    pub fn new(path: &str) -> AppResult<Self> {
        let p = Path::new(path);
        if let Some(parent) = p.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(AppError::StoreUnavailable(format!(
                "directory {} does not exist",
                parent.display()
            )));
        }

        let conn = Connection::open(p)
            .map_err(|e| AppError::StoreUnavailable(format!("{}: {}", path, e)))?;
        Ok(Self { conn })
    }

    /// Open the database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = Self::new(path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(pool)
    }

    /// In-memory store, used by tests and dry runs.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }
}
