//! Unified application error type.
//! All modules (config, db, remote, core, cli) return AppError to keep the
//! error handling consistent and easy to manage.
//!
//! Remote failures during an attendance operation are NOT reported through
//! this type: they are folded into the session state machine (see
//! `core::machine`). AppError is for everything around it.

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
    // Audit database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Transport / serialization
    // ---------------------------
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid work type: {0}")]
    InvalidWorkType(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    // ---------------------------
    // Session state machine
    // ---------------------------
    #[error("Illegal transition: {event} while {from}")]
    IllegalTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("Operation rejected: {0}")]
    OperationRejected(String),

    /// Final error banner of an attendance operation, already user-safe.
    #[error("{0}")]
    OperationFailed(String),

    #[error("Session expired, please log in again")]
    SessionExpired,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
