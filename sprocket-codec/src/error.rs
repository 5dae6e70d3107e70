//! Codec and registry error types

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Codec and registry errors
///
/// None of these are retried: they indicate a programming or configuration
/// error rather than a transient fault.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A codec was registered under an identifier that is already taken
    #[error("Codec already registered for type '{0}'")]
    DuplicateType(String),

    /// No codec is registered under the requested identifier
    #[error("No codec registered for type '{0}'")]
    UnknownType(String),

    /// Encode-time type mismatch at the erased boundary
    #[error("Invalid value for type '{type_id}': {message}")]
    InvalidValue { type_id: String, message: String },

    /// Decode-time structural failure, reported with the offending field
    #[error("Malformed record at field '{field}': {message}")]
    MalformedRecord { field: String, message: String },

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
