//! Common error types for OSB

use thiserror::Error;

/// Common result type for OSB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across OSB crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
