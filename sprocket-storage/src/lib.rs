//! Object store interface for staging local files against remote storage
//!
//! Map invocations and the feature store facade stage state files (such as
//! the online store database) through this narrow interface. The real cloud
//! SDK lives behind [`ObjectStore`]; this crate ships a filesystem-backed
//! implementation for local runs and tests. Transfer failures are never
//! swallowed, since the staged file is load-bearing for whatever operation
//! requested it.

pub mod error;
pub mod filesystem;
pub mod store;
pub mod uri;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use filesystem::FilesystemObjectStore;
pub use store::{ObjectStore, ObjectStoreCredentials};
pub use uri::RemoteUri;
