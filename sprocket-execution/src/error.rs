//! Error types for map execution

use std::time::Duration;

use thiserror::Error;

/// Result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Boxed cause preserved through the retry chain
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Map execution errors
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// One invocation exhausted its retries; terminates the whole map
    /// operation and identifies the failing input index
    #[error("Invocation {index} failed after {attempts} attempt(s): {source}")]
    Invocation {
        index: usize,
        attempts: u32,
        #[source]
        source: BoxError,
    },

    /// The map operation was cancelled before completion
    #[error("Map operation cancelled")]
    Cancelled,

    /// A spawned invocation task panicked or was aborted
    #[error("Invocation task join failed: {0}")]
    TaskJoin(String),

    /// Container process failed
    #[error("Container task '{task}' failed: {message}")]
    Container { task: String, message: String },

    /// A declared input variable was not supplied to a container task
    #[error("Container task '{task}' missing input variable '{variable}'")]
    MissingInput { task: String, variable: String },

    /// A declared output variable file was not produced
    #[error("Container task '{task}' produced no output file for variable '{variable}'")]
    MissingOutput { task: String, variable: String },

    /// A variable file could not be parsed as its declared scalar kind
    #[error("Variable '{variable}': {source}")]
    Scalar {
        variable: String,
        #[source]
        source: sprocket_codec::CodecError,
    },

    /// I/O error in the variable file protocol
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-invocation deadline exceeded; eligible for retry like any other
/// invocation failure
#[derive(Debug, Error)]
#[error("Invocation deadline of {limit:?} exceeded")]
pub struct DeadlineExceeded {
    pub limit: Duration,
}
