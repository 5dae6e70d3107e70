//! Feature store error types

use thiserror::Error;

/// Result type for feature store operations
pub type FeatureStoreResult<T> = std::result::Result<T, FeatureStoreError>;

/// Feature store errors
#[derive(Debug, Error)]
pub enum FeatureStoreError {
    /// Codec failure converting the configuration record
    #[error(transparent)]
    Codec(#[from] sprocket_codec::CodecError),

    /// Staging the online-store file failed; the enclosing operation aborts
    /// rather than run against a stale file
    #[error(transparent)]
    Transfer(#[from] sprocket_storage::StorageError),

    /// The underlying query engine rejected the call
    #[error("Feature engine error: {0}")]
    Engine(String),
}
