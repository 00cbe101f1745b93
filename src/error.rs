//! PromptGate error types.
//!
//! The detection engine itself is infallible: every input, however
//! malformed, produces a well-formed [`AnalysisResult`](crate::AnalysisResult).
//! These error types serve the surrounding layers only: configuration
//! loading, the HTTP server, and the CLI.

use thiserror::Error;

/// PromptGate errors.
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// API key store error (unknown key, exhausted quota).
    #[error("Key store error: {0}")]
    Store(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PromptGate operations
pub type Result<T> = std::result::Result<T, GateError>;

impl From<toml::de::Error> for GateError {
    fn from(err: toml::de::Error) -> Self {
        GateError::Config(err.to_string())
    }
}
