//! Filesystem-backed object store
//!
//! Maps `scheme://bucket/key` onto `<root>/<bucket>/<key>` under a local
//! directory. Used for local runs and tests; the interface matches what a
//! cloud-backed implementation provides.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::ObjectStore;
use crate::uri::RemoteUri;

/// Object store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, uri: &RemoteUri) -> PathBuf {
        self.root.join(&uri.bucket).join(&uri.key)
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn upload(&self, local_path: &Path, remote_uri: &RemoteUri) -> StorageResult<()> {
        let target = self.resolve(remote_uri);
        let transfer = |source: std::io::Error| StorageError::Transfer {
            uri: remote_uri.to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(transfer)?;
        }
        fs::copy(local_path, &target).await.map_err(transfer)?;

        debug!(local = %local_path.display(), remote = %remote_uri, "uploaded object");
        Ok(())
    }

    async fn download(&self, remote_uri: &RemoteUri, local_path: &Path) -> StorageResult<()> {
        let source = self.resolve(remote_uri);
        let transfer = |source: std::io::Error| StorageError::Transfer {
            uri: remote_uri.to_string(),
            source,
        };

        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent).await.map_err(transfer)?;
        }
        fs::copy(&source, local_path).await.map_err(transfer)?;

        debug!(remote = %remote_uri, local = %local_path.display(), "downloaded object");
        Ok(())
    }
}
