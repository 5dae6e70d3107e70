//! Object store trait and credentials

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::uri::RemoteUri;

/// Credentials handed to an object store at construction time
///
/// Always passed explicitly; implementations must not read or mutate the
/// process environment.
#[derive(Clone, Default)]
pub struct ObjectStoreCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint_url: Option<String>,
}

impl std::fmt::Debug for ObjectStoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// Blocking-style upload/download interface over remote object storage
///
/// Both operations fail with [`crate::StorageError::Transfer`] on network or
/// permission problems; callers abort the enclosing operation on failure.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file to the remote location
    async fn upload(&self, local_path: &Path, remote_uri: &RemoteUri) -> StorageResult<()>;

    /// Download a remote object to the local path
    async fn download(&self, remote_uri: &RemoteUri, local_path: &Path) -> StorageResult<()>;
}
