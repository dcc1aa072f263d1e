//! Unified application error type.
//! All modules (db, core, cli, http) return AppError so that the transports
//! can map every failure to a message and a status class in one place.

use std::io;
use thiserror::Error;

/// Coarse classification used by the transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Validation,
    Constraint,
    Storage,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Not found
    // ---------------------------
    #[error("Working group not found: #{0}")]
    GroupNotFound(i64),

    #[error("Round not found: #{0}")]
    RoundNotFound(i64),

    // ---------------------------
    // Round state
    // ---------------------------
    #[error("Cannot start: working group '{0}' already has a running round")]
    AlreadyRunning(String),

    #[error("Cannot stop: no round is running for working group '{0}'")]
    NotRunning(String),

    #[error("Round #{0} is already completed")]
    RoundAlreadyClosed(i64),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Group name cannot be empty")]
    InvalidName,

    #[error("A working group named '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid working group id: '{0}'")]
    InvalidGroupId(String),

    // ---------------------------
    // Constraints
    // ---------------------------
    #[error("Cannot delete the last remaining working group")]
    LastGroup,

    #[error(
        "Cannot delete working group with {0} recorded round(s). Reset the group first."
    )]
    GroupHasRounds(i64),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Invalid timestamp in database: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // IO / config / export
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::GroupNotFound(_) | AppError::RoundNotFound(_) => ErrorKind::NotFound,
            AppError::AlreadyRunning(_)
            | AppError::NotRunning(_)
            | AppError::RoundAlreadyClosed(_) => ErrorKind::InvalidState,
            AppError::InvalidName | AppError::DuplicateName(_) | AppError::InvalidGroupId(_) => {
                ErrorKind::Validation
            }
            AppError::LastGroup | AppError::GroupHasRounds(_) => ErrorKind::Constraint,
            AppError::Db(_) | AppError::Migration(_) | AppError::InvalidTimestamp(_) => {
                ErrorKind::Storage
            }
            AppError::Io(_) | AppError::Config(_) | AppError::Export(_) | AppError::Other(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Export(format!("JSON serialization error: {e}"))
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(format!("CSV write error: {e}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
