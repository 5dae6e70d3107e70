//! Portable wire records exchanged across serialization boundaries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Schema-less structured value used at serialization boundaries.
///
/// A record maps string field names to generic values (null, booleans,
/// numbers, strings, nested records, sequences), the equivalent of a
/// protobuf `Struct`. Field-name case and nesting depth survive a round trip
/// exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortableRecord(Map<String, JsonValue>);

impl PortableRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a field value by name
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Whether a top-level field is present
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Insert a field, returning the previous value if any
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Iterate over top-level field names
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the record, yielding the underlying map
    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }
}

impl From<Map<String, JsonValue>> for PortableRecord {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<JsonValue> for PortableRecord {
    type Error = crate::error::CodecError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(crate::error::CodecError::MalformedRecord {
                field: String::new(),
                message: format!("expected an object at the record root, got {}", other),
            }),
        }
    }
}

impl From<PortableRecord> for JsonValue {
    fn from(record: PortableRecord) -> Self {
        JsonValue::Object(record.0)
    }
}
