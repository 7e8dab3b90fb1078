//! Common error types for bidsprep

use thiserror::Error;

/// Common result type for bidsprep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across bidsprep tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tabular manifest is malformed
    #[error("Table error: {0}")]
    Table(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
