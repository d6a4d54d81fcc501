//! Error types for mnema.

use thiserror::Error;

/// Result type alias for memory-engine operations.
pub type Result<T> = std::result::Result<T, MnemaError>;

/// Main error type for the memory engine.
///
/// Empty results are never errors: a user with no stored chunks retrieves an
/// empty sequence, and a dimension mismatch between a stored embedding and a
/// query embedding degrades to a similarity of zero rather than failing.
#[derive(Error, Debug)]
pub enum MnemaError {
    /// The live embedding provider call failed (auth, network, rate limit).
    /// Not retried here — retry policy belongs to the calling orchestration
    /// layer.
    #[error("embedding provider error: {0}")]
    Embedding(String),

    /// The persistence or read backend failed. Never silently degraded to a
    /// different storage backend.
    #[error("store unavailable: {0}")]
    Store(String),

    /// Invalid or unusable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for MnemaError {
    fn from(err: rusqlite::Error) -> Self {
        MnemaError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for MnemaError {
    fn from(err: reqwest::Error) -> Self {
        MnemaError::Embedding(err.to_string())
    }
}
