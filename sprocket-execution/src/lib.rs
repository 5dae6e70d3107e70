//! Map fan-out execution for Sprocket
//!
//! The centerpiece is [`MapExecutor`]: it runs one unit of work over an
//! ordered collection of inputs, each invocation isolated from the others,
//! with bounded concurrency, independent per-invocation retry, and an output
//! collection that always preserves input order. A [`reduce`] step folds the
//! ordered outputs into one aggregate value.
//!
//! The crate also carries the raw container variable protocol: declared
//! scalar inputs are written one file per variable into a mounted directory,
//! the container entrypoint runs, and declared outputs are read back the
//! same way.

pub mod backoff;
pub mod container;
pub mod error;
pub mod map;
pub mod policy;
pub mod reduce;
pub mod substrate;

// Re-export main types
pub use backoff::{BackoffStrategy, RetryBackoff};
pub use container::{ContainerTaskSpec, VariableSpec};
pub use error::{DeadlineExceeded, ExecutionError, ExecutionResult};
pub use map::{InvocationContext, MapExecutor, WorkItem};
pub use policy::ExecutionPolicy;
pub use reduce::{coalesce, fold_ordered, try_fold_ordered};
pub use substrate::{ContainerSubstrate, ProcessSubstrate};
