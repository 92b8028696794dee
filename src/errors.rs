//! Unified error type for the loader.
//! Config, db and cli modules all return AppError so the caller decides
//! whether a failure is fatal.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config file
    // ---------------------------
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Malformed configuration file {}: {source}", path.display())]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration field '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    /// Non-fatal: the loader falls back to the flat defaults.
    #[error("Setting group '{0}' not found, using defaults")]
    GroupNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Database
    // ---------------------------
    /// The server could not be reached or refused the login.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] mysql::Error),

    /// Any other driver error, e.g. a failing statement.
    #[error("Database error: {0}")]
    Db(#[from] mysql::Error),
}

impl AppError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
