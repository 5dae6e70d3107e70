//! Codec for the feature store configuration record
//!
//! The sole authority for [`FeatureStoreConfig`] ↔ [`PortableRecord`]
//! conversion. The portable shape nests the config under one `config`
//! field:
//!
//! ```json
//! {"config": {"registry_path": "...", "project": "...",
//!             "storage_bucket": "...", "online_store_path": "..."}}
//! ```

use sprocket_codec::{CodecError, PortableRecord, TypeCodec, TypeDescriptor};

use crate::config::FeatureStoreConfig;

/// Registry identifier for the feature store codec
pub const FEATURE_STORE_TYPE_ID: &str = "feature_store";

const CONFIG_FIELD: &str = "config";

/// Converts [`FeatureStoreConfig`] to and from its portable record shape
#[derive(Debug, Default)]
pub struct FeatureStoreCodec;

impl FeatureStoreCodec {
    /// Create the codec
    pub fn new() -> Self {
        Self
    }
}

impl TypeCodec for FeatureStoreCodec {
    type Value = FeatureStoreConfig;

    fn type_id(&self) -> &str {
        FEATURE_STORE_TYPE_ID
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Record
    }

    fn encode(&self, value: &FeatureStoreConfig) -> Result<PortableRecord, CodecError> {
        let config = serde_json::to_value(value)?;
        let mut record = PortableRecord::new();
        record.insert(CONFIG_FIELD, config);
        Ok(record)
    }

    fn decode(&self, record: &PortableRecord) -> Result<FeatureStoreConfig, CodecError> {
        if record.is_empty() {
            return Err(CodecError::MalformedRecord {
                field: CONFIG_FIELD.to_string(),
                message: "record is empty".to_string(),
            });
        }

        let config = record
            .get(CONFIG_FIELD)
            .ok_or_else(|| CodecError::MalformedRecord {
                field: CONFIG_FIELD.to_string(),
                message: "field is absent".to_string(),
            })?;

        // Missing online_store_path falls back to the documented default;
        // missing required fields are a decode failure.
        serde_json::from_value(config.clone()).map_err(|e| CodecError::MalformedRecord {
            field: CONFIG_FIELD.to_string(),
            message: e.to_string(),
        })
    }
}
