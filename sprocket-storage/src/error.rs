//! Storage error types

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// An upload or download failed; the operation that requested it must
    /// abort rather than proceed with a stale local file
    #[error("Transfer failed for '{uri}': {source}")]
    Transfer {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote URI could not be parsed
    #[error("Invalid remote URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    /// Credentials were missing or rejected
    #[error("Credential error: {0}")]
    Credentials(String),

    /// I/O errors outside a transfer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
