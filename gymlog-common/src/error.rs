//! Common error types for gymlog

use thiserror::Error;

/// Common result type for gymlog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the gymlog workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (failed a form or import field constraint)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed delimited-text payload
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
