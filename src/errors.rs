//! Unified application error type.
//! All modules (db, core, cli, export, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    // ---------------------------
    // Entry validation
    // ---------------------------
    #[error("End time {end} is before start time {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Invalid materials cost: {0}")]
    InvalidCost(f64),

    #[error("Work entry #{0} not found")]
    EntryNotFound(i64),

    // ---------------------------
    // Timer
    // ---------------------------
    #[error("A timer is already running since {0}")]
    TimerAlreadyRunning(String),

    #[error("No timer is running")]
    NoActiveTimer,

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
    // Export / backup errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Backup error: {0}")]
    Backup(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
