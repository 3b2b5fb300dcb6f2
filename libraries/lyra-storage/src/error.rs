//! Error types for storage

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Empty or whitespace-only text submitted to the recent-entries log
    #[error("Input is empty or blank")]
    InvalidInput,

    /// Stored payload failed to parse
    #[error("Corrupt stored value: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// IO error from a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
