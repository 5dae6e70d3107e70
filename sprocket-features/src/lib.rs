//! Feature store integration for Sprocket
//!
//! Provides the structured [`FeatureStoreConfig`] record, the codec that is
//! the sole authority for converting it to and from a portable record, and a
//! [`FeatureStore`] facade that stages the online-store file through an
//! object store around calls into an opaque query engine.

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;

// Re-export main types
pub use codec::{FeatureStoreCodec, FEATURE_STORE_TYPE_ID};
pub use config::{FeatureStoreConfig, DEFAULT_ONLINE_STORE_PATH};
pub use engine::{EntityRow, FeatureEngine, FeatureFrame, FeatureObject};
pub use error::{FeatureStoreError, FeatureStoreResult};
pub use store::FeatureStore;
