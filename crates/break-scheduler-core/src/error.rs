//! Core error types for break-scheduler-core.
//!
//! The scheduler itself never fails; errors only arise at the edges.
//! Duration text and configuration edits report their own typed errors
//! (`ParseError`, `ValidationError`), which the editor turns into reverts.
//! `CoreError` covers the persistence store and the settings file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for break-scheduler-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Settings file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Settings-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse settings
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),
}

/// Validation errors raised at the configuration edit boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown configuration field name
    #[error("Unknown configuration field: {0}")]
    UnknownField(String),
}

/// Duration expression parse failures.
///
/// A failure always discards the whole expression; there are no partial results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A term contained no `<digits><unit?>` group at all.
    #[error("term '{0}' contains no digits")]
    MissingDigits(String),

    /// A character other than a digit or `h`/`m`/`s` appeared in a term.
    #[error("invalid unit '{unit}' in term '{term}'")]
    InvalidUnit { term: String, unit: char },

    /// The expression does not fit in a signed 64-bit second count.
    #[error("duration expression overflows")]
    Overflow,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: rusqlite::ErrorCode) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code,
                extended_code: 0,
            },
            None,
        )
    }

    #[test]
    fn locked_database_maps_to_locked() {
        let err: CoreError = sqlite_failure(rusqlite::ErrorCode::DatabaseLocked).into();
        assert!(matches!(err, CoreError::Database(DatabaseError::Locked)));
    }

    #[test]
    fn other_sqlite_failures_become_query_errors() {
        let err: CoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::QueryFailed(_))
        ));
        let err: CoreError = sqlite_failure(rusqlite::ErrorCode::ConstraintViolation).into();
        assert!(err.to_string().starts_with("Database error: Query failed"));
    }
}
