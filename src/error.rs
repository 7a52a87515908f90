//! Error types for the analyzer shell.
//!
//! The span resolver and layered renderer are infallible; everything that
//! touches files, the network or user input returns [`Result`].

use thiserror::Error;

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for analyzer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be used.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Completion endpoint failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The environment variable holding the API key is unset or empty.
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),
}

impl Error {
    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an HTTP error.
    #[must_use]
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
