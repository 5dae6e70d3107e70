//! Structured feature store configuration record

use serde::{Deserialize, Serialize};
use sprocket_storage::RemoteUri;

/// Default online store filename applied when an encoder omitted the field
pub const DEFAULT_ONLINE_STORE_PATH: &str = "online.db";

/// Configuration record for one feature store
///
/// Constructed by the caller and never mutated after construction within a
/// single boundary crossing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStoreConfig {
    /// Path of the registry file inside the storage bucket
    pub registry_path: String,

    /// Feature store project name
    pub project: String,

    /// Bucket holding the registry and the staged online store
    pub storage_bucket: String,

    /// Filename of the sqlite online store, staged in and out of the bucket
    #[serde(default = "default_online_store_path")]
    pub online_store_path: String,
}

impl FeatureStoreConfig {
    /// Build a config with the default online store path
    pub fn new(
        registry_path: impl Into<String>,
        project: impl Into<String>,
        storage_bucket: impl Into<String>,
    ) -> Self {
        Self {
            registry_path: registry_path.into(),
            project: project.into(),
            storage_bucket: storage_bucket.into(),
            online_store_path: default_online_store_path(),
        }
    }

    /// Remote location of the registry file
    pub fn registry_uri(&self, scheme: &str) -> RemoteUri {
        RemoteUri::new(scheme, &self.storage_bucket, &self.registry_path)
    }

    /// Remote location of the staged online store
    pub fn online_store_uri(&self, scheme: &str) -> RemoteUri {
        RemoteUri::new(scheme, &self.storage_bucket, &self.online_store_path)
    }
}

fn default_online_store_path() -> String {
    DEFAULT_ONLINE_STORE_PATH.to_string()
}
