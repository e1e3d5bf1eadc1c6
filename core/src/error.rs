//! Error types and handling for Smart Search Core

use thiserror::Error;

/// Result type alias for Smart Search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Smart Search Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Empty trigger configured for engine '{engine}'")]
    EmptyTrigger { engine: String },

    #[error("Unknown engine: {name}")]
    UnknownEngine { name: String },
}
