//! Scalar variable kinds and their serialized-string form
//!
//! Raw container tasks exchange data as one file per variable, each file
//! holding a serialized scalar. These types define the scalar kinds a
//! container interface may declare and how they parse from and print to that
//! on-disk representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Kind of a declared scalar variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Float,
    Integer,
    String,
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Float => "float",
            ScalarKind::Integer => "integer",
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
        };
        write!(f, "{}", name)
    }
}

/// A scalar value crossing the container file protocol
///
/// Untagged variant order matters: `Integer` must precede `Float` or every
/// whole number deserializes as a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl ScalarValue {
    /// Kind of this value
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Integer(_) => ScalarKind::Integer,
            ScalarValue::String(_) => ScalarKind::String,
            ScalarValue::Boolean(_) => ScalarKind::Boolean,
        }
    }

    /// Parse the serialized-string form of a variable of the given kind
    ///
    /// Surrounding whitespace (including the trailing newline most tools
    /// emit) is ignored for non-string kinds; string variables are taken
    /// verbatim apart from one trailing newline.
    pub fn parse(kind: ScalarKind, raw: &str) -> Result<Self, CodecError> {
        let malformed = |message: String| CodecError::MalformedRecord {
            field: kind.to_string(),
            message,
        };

        match kind {
            ScalarKind::Float => raw
                .trim()
                .parse::<f64>()
                .map(ScalarValue::Float)
                .map_err(|e| malformed(format!("invalid float '{}': {}", raw.trim(), e))),
            ScalarKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ScalarValue::Integer)
                .map_err(|e| malformed(format!("invalid integer '{}': {}", raw.trim(), e))),
            ScalarKind::Boolean => match raw.trim() {
                "true" | "True" | "1" => Ok(ScalarValue::Boolean(true)),
                "false" | "False" | "0" => Ok(ScalarValue::Boolean(false)),
                other => Err(malformed(format!("invalid boolean '{}'", other))),
            },
            ScalarKind::String => {
                let value = raw.strip_suffix('\n').unwrap_or(raw);
                Ok(ScalarValue::String(value.to_string()))
            }
        }
    }

    /// Serialized-string form written to a variable file
    pub fn to_wire_string(&self) -> String {
        match self {
            ScalarValue::Float(v) => v.to_string(),
            ScalarValue::Integer(v) => v.to_string(),
            ScalarValue::String(v) => v.clone(),
            ScalarValue::Boolean(v) => v.to_string(),
        }
    }

    /// Float accessor
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(v) => Some(*v),
            ScalarValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// String accessor
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Integer(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::String(v.to_string())
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Boolean(v)
    }
}
