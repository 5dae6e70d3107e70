//! Feature store facade
//!
//! Wraps the opaque query engine with object-store staging of the online
//! store file: operations that read or write online state download the file
//! first and upload it afterwards, and abort on any transfer failure. The
//! file is load-bearing for subsequent materialize and online-read calls.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

use sprocket_storage::ObjectStore;

use crate::config::FeatureStoreConfig;
use crate::engine::{EntityRow, FeatureEngine, FeatureFrame, FeatureObject};
use crate::error::FeatureStoreResult;

/// Facade over one feature store
pub struct FeatureStore {
    config: FeatureStoreConfig,
    engine: Arc<dyn FeatureEngine>,
    object_store: Arc<dyn ObjectStore>,
    uri_scheme: String,
    workdir: PathBuf,
}

impl FeatureStore {
    /// Create a facade over the given engine and object store
    ///
    /// `workdir` is where the online store file is staged locally.
    pub fn new(
        config: FeatureStoreConfig,
        engine: Arc<dyn FeatureEngine>,
        object_store: Arc<dyn ObjectStore>,
        uri_scheme: impl Into<String>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            engine,
            object_store,
            uri_scheme: uri_scheme.into(),
            workdir: workdir.into(),
        }
    }

    /// The configuration record this store was built from
    pub fn config(&self) -> &FeatureStoreConfig {
        &self.config
    }

    /// Local staging path of the online store file
    pub fn local_online_store(&self) -> PathBuf {
        self.workdir.join(&self.config.online_store_path)
    }

    /// Register objects and stage the initialized online store
    ///
    /// Applying initializes the online store tables, so the local file is
    /// uploaded afterwards.
    pub async fn apply(&self, objects: Vec<FeatureObject>) -> FeatureStoreResult<()> {
        info!(project = %self.config.project, count = objects.len(), "applying feature objects");
        self.engine.apply(objects).await?;
        self.upload_online_store().await
    }

    /// Point-in-time join of historical features; no online state involved
    pub async fn get_historical_features(
        &self,
        entity_rows: Vec<EntityRow>,
        features: Vec<String>,
    ) -> FeatureStoreResult<FeatureFrame> {
        self.engine.get_historical_features(entity_rows, features).await
    }

    /// Materialize the window into the online store and stage it back
    pub async fn materialize(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> FeatureStoreResult<()> {
        self.download_online_store().await?;
        info!(project = %self.config.project, %start_date, %end_date, "materializing features");
        self.engine.materialize(start_date, end_date).await?;
        self.upload_online_store().await
    }

    /// Read current feature values from the staged online store
    pub async fn get_online_features(
        &self,
        features: Vec<String>,
        entity_rows: Vec<EntityRow>,
    ) -> FeatureStoreResult<HashMap<String, Vec<JsonValue>>> {
        self.download_online_store().await?;
        self.engine.get_online_features(features, entity_rows).await
    }

    async fn upload_online_store(&self) -> FeatureStoreResult<()> {
        let local = self.local_online_store();
        let remote = self.config.online_store_uri(&self.uri_scheme);
        self.object_store.upload(&local, &remote).await?;
        Ok(())
    }

    async fn download_online_store(&self) -> FeatureStoreResult<()> {
        let local = self.local_online_store();
        let remote = self.config.online_store_uri(&self.uri_scheme);
        self.object_store.download(&remote, &local).await?;
        Ok(())
    }
}

impl std::fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureStore")
            .field("config", &self.config)
            .field("uri_scheme", &self.uri_scheme)
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureStoreError;
    use async_trait::async_trait;
    use sprocket_storage::FilesystemObjectStore;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct FakeEngine {
        applied: AtomicU32,
        materialized: AtomicU32,
    }

    #[async_trait]
    impl FeatureEngine for FakeEngine {
        async fn apply(&self, _objects: Vec<FeatureObject>) -> FeatureStoreResult<()> {
            self.applied.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn get_historical_features(
            &self,
            entity_rows: Vec<EntityRow>,
            features: Vec<String>,
        ) -> FeatureStoreResult<FeatureFrame> {
            Ok(FeatureFrame {
                columns: features,
                rows: entity_rows.iter().map(|_| Vec::new()).collect(),
            })
        }

        async fn materialize(
            &self,
            _start_date: DateTime<Utc>,
            _end_date: DateTime<Utc>,
        ) -> FeatureStoreResult<()> {
            self.materialized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn get_online_features(
            &self,
            features: Vec<String>,
            _entity_rows: Vec<EntityRow>,
        ) -> FeatureStoreResult<HashMap<String, Vec<JsonValue>>> {
            Ok(features.into_iter().map(|f| (f, Vec::new())).collect())
        }
    }

    struct Fixture {
        store: FeatureStore,
        engine: Arc<FakeEngine>,
        _remote_root: tempfile::TempDir,
        _workdir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let remote_root = tempfile::tempdir().unwrap();
        let workdir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeEngine::default());

        let store = FeatureStore::new(
            FeatureStoreConfig::new("registry.db", "horsecolic", "feast-demo"),
            engine.clone(),
            Arc::new(FilesystemObjectStore::new(remote_root.path())),
            "s3",
            workdir.path(),
        );

        Fixture {
            store,
            engine,
            _remote_root: remote_root,
            _workdir: workdir,
        }
    }

    #[tokio::test]
    async fn test_apply_uploads_online_store() {
        let fixture = fixture();

        // The engine initializes the online store locally before upload.
        std::fs::write(fixture.store.local_online_store(), b"tables").unwrap();

        fixture.store.apply(Vec::new()).await.unwrap();
        assert_eq!(fixture.engine.applied.load(Ordering::SeqCst), 1);

        // A later materialize can download what apply staged.
        fixture
            .store
            .materialize(Utc::now(), Utc::now())
            .await
            .unwrap();
        assert_eq!(fixture.engine.materialized.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_materialize_aborts_on_missing_remote_state() {
        let fixture = fixture();

        let err = fixture
            .store
            .materialize(Utc::now(), Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, FeatureStoreError::Transfer(_)));
        // The engine must not run against a stale or absent local file.
        assert_eq!(fixture.engine.materialized.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_online_read_stages_then_queries() {
        let fixture = fixture();

        std::fs::write(fixture.store.local_online_store(), b"tables").unwrap();
        fixture.store.apply(Vec::new()).await.unwrap();

        let values = fixture
            .store
            .get_online_features(vec!["driver_stats:avg_trips".to_string()], Vec::new())
            .await
            .unwrap();
        assert!(values.contains_key("driver_stats:avg_trips"));
    }
}
