//! Codec registry with a build-then-freeze lifecycle
//!
//! Registration happens once at process startup through
//! [`CodecRegistryBuilder`]; the frozen [`CodecRegistry`] is read-only and
//! safe to share across tasks without locking, since lookups can only start
//! after `build()` has consumed the builder.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::codec::{ErasedTypeCodec, TypeCodec};
use crate::error::{CodecError, CodecResult};
use crate::record::PortableRecord;

/// Accumulates codecs during the registration phase
#[derive(Default)]
pub struct CodecRegistryBuilder {
    codecs: HashMap<String, Arc<dyn ErasedTypeCodec>>,
}

impl CodecRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codec under the type identifier it declares
    ///
    /// Registration is strict: a second codec under the same identifier is
    /// rejected with [`CodecError::DuplicateType`] rather than replacing the
    /// first.
    pub fn register<C: TypeCodec>(&mut self, codec: C) -> CodecResult<()> {
        let type_id = TypeCodec::type_id(&codec).to_string();
        if self.codecs.contains_key(&type_id) {
            return Err(CodecError::DuplicateType(type_id));
        }

        debug!(type_id = %type_id, "registered codec");
        self.codecs.insert(type_id, Arc::new(codec));
        Ok(())
    }

    /// Freeze the registry; no further registration is possible
    pub fn build(self) -> CodecRegistry {
        CodecRegistry {
            codecs: self.codecs,
        }
    }
}

/// Frozen, read-only codec registry
///
/// Shared across tasks after startup; holds no interior mutability.
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn ErasedTypeCodec>>,
}

impl CodecRegistry {
    /// Look up the codec for a type identifier
    pub fn lookup(&self, type_id: &str) -> CodecResult<Arc<dyn ErasedTypeCodec>> {
        self.codecs
            .get(type_id)
            .cloned()
            .ok_or_else(|| CodecError::UnknownType(type_id.to_string()))
    }

    /// Whether a codec is registered for the identifier
    pub fn contains(&self, type_id: &str) -> bool {
        self.codecs.contains_key(type_id)
    }

    /// Registered type identifiers
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Encode a native value through the codec registered for `type_id`
    pub fn encode_value<T: 'static>(&self, type_id: &str, value: &T) -> CodecResult<PortableRecord> {
        self.lookup(type_id)?.encode_any(value)
    }

    /// Decode a portable record through the codec registered for `type_id`
    pub fn decode_value<T: 'static>(&self, type_id: &str, record: &PortableRecord) -> CodecResult<T> {
        let decoded = self.lookup(type_id)?.decode_any(record)?;
        downcast_value(decoded, type_id)
    }
}

fn downcast_value<T: 'static>(value: Box<dyn Any>, type_id: &str) -> CodecResult<T> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| CodecError::InvalidValue {
            type_id: type_id.to_string(),
            message: "decoded value does not match the requested native type".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TypeDescriptor;

    struct LabelCodec;

    impl TypeCodec for LabelCodec {
        type Value = String;

        fn type_id(&self) -> &str {
            "label"
        }

        fn describe(&self) -> TypeDescriptor {
            TypeDescriptor::Record
        }

        fn encode(&self, value: &String) -> CodecResult<PortableRecord> {
            let mut record = PortableRecord::new();
            record.insert("label", value.as_str());
            Ok(record)
        }

        fn decode(&self, record: &PortableRecord) -> CodecResult<String> {
            record
                .get("label")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| CodecError::MalformedRecord {
                    field: "label".to_string(),
                    message: "missing or non-string".to_string(),
                })
        }
    }

    #[test]
    fn test_register_then_lookup() {
        let mut builder = CodecRegistryBuilder::new();
        builder.register(LabelCodec).unwrap();
        let registry = builder.build();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("label"));

        // Qualified call: a bare .type_id() on the Arc resolves to
        // Any::type_id instead of the codec's identifier.
        let codec = registry.lookup("label").unwrap();
        assert_eq!(ErasedTypeCodec::type_id(codec.as_ref()), "label");
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut builder = CodecRegistryBuilder::new();
        builder.register(LabelCodec).unwrap();

        let err = builder.register(LabelCodec).unwrap_err();
        assert!(matches!(err, CodecError::DuplicateType(ref id) if id == "label"));
    }

    #[test]
    fn test_unknown_lookup_is_rejected() {
        let registry = CodecRegistryBuilder::new().build();

        let err = registry.lookup("label").err().unwrap();
        assert!(matches!(err, CodecError::UnknownType(ref id) if id == "label"));
    }

    #[test]
    fn test_typed_encode_decode_helpers() {
        let mut builder = CodecRegistryBuilder::new();
        builder.register(LabelCodec).unwrap();
        let registry = builder.build();

        let record = registry
            .encode_value("label", &"cog".to_string())
            .unwrap();
        let back: String = registry.decode_value("label", &record).unwrap();
        assert_eq!(back, "cog");
    }

    #[test]
    fn test_decode_into_wrong_native_type() {
        let mut builder = CodecRegistryBuilder::new();
        builder.register(LabelCodec).unwrap();
        let registry = builder.build();

        let record = registry.encode_value("label", &"cog".to_string()).unwrap();
        let err = registry.decode_value::<i64>("label", &record).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
    }
}
