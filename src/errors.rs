//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that every failure
//! reaches the caller as a structured value instead of a panic.

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("No session with id {0}")]
    NotFound(i64),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    // ---------------------------
    // State machines (live timer, field editor)
    // ---------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Translate a rusqlite failure, surfacing UNIQUE/NOT NULL/CHECK violations
    /// as `ConstraintViolation` instead of a generic database error.
    pub fn from_write(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::ConstraintViolation(
                    msg.clone().unwrap_or_else(|| "constraint failed".to_string()),
                )
            }
            _ => AppError::Db(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
