//! Opaque feature store query engine interface
//!
//! The real engine (registry, offline store, materialization) lives outside
//! this workspace; the facade only needs these four calls. Tests use an
//! in-memory fake.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::FeatureStoreResult;

/// Objects that can be applied to the feature registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureObject {
    Entity {
        name: String,
        join_key: String,
    },
    FeatureView {
        name: String,
        features: Vec<String>,
    },
    FeatureService {
        name: String,
        feature_views: Vec<String>,
    },
}

/// One entity row used to key feature retrieval
pub type EntityRow = HashMap<String, JsonValue>;

/// Tabular result of a historical feature retrieval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

impl FeatureFrame {
    /// Number of result rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Narrow interface to the feature store's query engine
#[async_trait]
pub trait FeatureEngine: Send + Sync {
    /// Register objects with the feature registry and initialize the online
    /// store
    async fn apply(&self, objects: Vec<FeatureObject>) -> FeatureStoreResult<()>;

    /// Point-in-time join of historical feature values onto entity rows
    async fn get_historical_features(
        &self,
        entity_rows: Vec<EntityRow>,
        features: Vec<String>,
    ) -> FeatureStoreResult<FeatureFrame>;

    /// Load feature values for the window into the online store
    async fn materialize(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> FeatureStoreResult<()>;

    /// Read current feature values for entity rows from the online store
    async fn get_online_features(
        &self,
        features: Vec<String>,
        entity_rows: Vec<EntityRow>,
    ) -> FeatureStoreResult<HashMap<String, Vec<JsonValue>>>;
}
