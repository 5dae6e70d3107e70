//! The type codec contract
//!
//! A codec is the sole authority for converting one native type to and from
//! its [`PortableRecord`] wire shape. Codecs are written against the typed
//! [`TypeCodec`] trait; the registry stores them behind the object-safe
//! [`ErasedTypeCodec`] so heterogeneous codecs can share one table.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::record::PortableRecord;
use crate::scalar::ScalarKind;

/// Structural descriptor of a codec's wire representation
///
/// The boundary layer uses this to validate shape before invoking a
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Generic structured record
    Record,

    /// Single scalar value
    Scalar { kind: ScalarKind },
}

/// Bidirectional converter between a native value and a portable record
pub trait TypeCodec: Send + Sync + 'static {
    /// The native type this codec converts
    type Value: 'static;

    /// Logical type identifier used for registry dispatch
    fn type_id(&self) -> &str;

    /// Structural descriptor of the wire shape
    fn describe(&self) -> TypeDescriptor;

    /// Convert a native value into its portable record
    fn encode(&self, value: &Self::Value) -> Result<PortableRecord, CodecError>;

    /// Reconstruct a native value from a portable record
    fn decode(&self, record: &PortableRecord) -> Result<Self::Value, CodecError>;
}

/// Object-safe counterpart of [`TypeCodec`] used by the registry
///
/// Values cross this boundary as `dyn Any`; a mismatched downcast means the
/// caller handed the wrong native type to the codec and surfaces as
/// [`CodecError::InvalidValue`].
pub trait ErasedTypeCodec: Send + Sync {
    /// Logical type identifier used for registry dispatch
    fn type_id(&self) -> &str;

    /// Structural descriptor of the wire shape
    fn describe(&self) -> TypeDescriptor;

    /// Encode a type-erased native value
    fn encode_any(&self, value: &dyn Any) -> Result<PortableRecord, CodecError>;

    /// Decode into a type-erased native value
    fn decode_any(&self, record: &PortableRecord) -> Result<Box<dyn Any>, CodecError>;
}

impl<C: TypeCodec> ErasedTypeCodec for C {
    fn type_id(&self) -> &str {
        TypeCodec::type_id(self)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeCodec::describe(self)
    }

    fn encode_any(&self, value: &dyn Any) -> Result<PortableRecord, CodecError> {
        let value = value
            .downcast_ref::<C::Value>()
            .ok_or_else(|| CodecError::InvalidValue {
                type_id: TypeCodec::type_id(self).to_string(),
                message: "value is not an instance of the codec's native type".to_string(),
            })?;
        self.encode(value)
    }

    fn decode_any(&self, record: &PortableRecord) -> Result<Box<dyn Any>, CodecError> {
        Ok(Box::new(self.decode(record)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct PointCodec;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl TypeCodec for PointCodec {
        type Value = Point;

        fn type_id(&self) -> &str {
            "point"
        }

        fn describe(&self) -> TypeDescriptor {
            TypeDescriptor::Record
        }

        fn encode(&self, value: &Point) -> Result<PortableRecord, CodecError> {
            let mut record = PortableRecord::new();
            record.insert("x", value.x);
            record.insert("y", value.y);
            Ok(record)
        }

        fn decode(&self, record: &PortableRecord) -> Result<Point, CodecError> {
            let field = |name: &str| {
                record
                    .get(name)
                    .and_then(|v| v.as_i64())
                    .ok_or_else(|| CodecError::MalformedRecord {
                        field: name.to_string(),
                        message: "missing or non-integer".to_string(),
                    })
            };
            Ok(Point {
                x: field("x")?,
                y: field("y")?,
            })
        }
    }

    #[test]
    fn test_erased_encode_rejects_foreign_value() {
        let codec = PointCodec;
        let not_a_point = "nope".to_string();

        let err = codec.encode_any(&not_a_point).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { ref type_id, .. } if type_id == "point"));
    }

    #[test]
    fn test_erased_round_trip() {
        let codec = PointCodec;
        let point = Point { x: 3, y: -7 };

        let record = codec.encode_any(&point).unwrap();
        assert_eq!(record.get("x"), Some(&json!(3)));

        let decoded = codec.decode_any(&record).unwrap();
        let decoded = decoded.downcast::<Point>().unwrap();
        assert_eq!(*decoded, point);
    }
}
