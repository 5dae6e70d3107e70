//! Portable wire records and the type codec registry
//!
//! This crate provides the type-marshaling layer used whenever a typed value
//! crosses a process or serialization boundary: a schema-less
//! [`PortableRecord`] wire value, the [`TypeCodec`] contract for converting a
//! native type to and from that wire value, and a registry that dispatches
//! codecs by logical type identifier. The registry has an explicit
//! build-then-freeze lifecycle: codecs are registered through
//! [`CodecRegistryBuilder`], and the frozen [`CodecRegistry`] only supports
//! lookups.

pub mod codec;
pub mod error;
pub mod record;
pub mod registry;
pub mod scalar;

// Re-export main types
pub use codec::{ErasedTypeCodec, TypeCodec, TypeDescriptor};
pub use error::{CodecError, CodecResult};
pub use record::PortableRecord;
pub use registry::{CodecRegistry, CodecRegistryBuilder};
pub use scalar::{ScalarKind, ScalarValue};
