//! Remote URI parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// A parsed `scheme://bucket/key` remote object location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUri {
    pub scheme: String,
    pub bucket: String,
    pub key: String,
}

impl RemoteUri {
    /// Build a URI from its parts
    pub fn new(scheme: impl Into<String>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for RemoteUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}

impl FromStr for RemoteUri {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| StorageError::InvalidUri {
            uri: s.to_string(),
            message: message.to_string(),
        };

        let (scheme, rest) = s.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
        if scheme.is_empty() {
            return Err(invalid("missing scheme"));
        }

        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing key"))?;
        if bucket.is_empty() {
            return Err(invalid("missing bucket"));
        }
        if key.is_empty() {
            return Err(invalid("missing key"));
        }

        Ok(Self::new(scheme, bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let uri: RemoteUri = "s3://feast-demo/registry.db".parse().unwrap();
        assert_eq!(uri.scheme, "s3");
        assert_eq!(uri.bucket, "feast-demo");
        assert_eq!(uri.key, "registry.db");
        assert_eq!(uri.to_string(), "s3://feast-demo/registry.db");
    }

    #[test]
    fn test_parse_nested_key() {
        let uri: RemoteUri = "s3://bucket/a/b/online.db".parse().unwrap();
        assert_eq!(uri.key, "a/b/online.db");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["no-scheme/bucket", "s3://", "s3://bucket", "s3://bucket/", "://bucket/key"] {
            let err = bad.parse::<RemoteUri>().unwrap_err();
            assert!(matches!(err, StorageError::InvalidUri { .. }), "accepted {}", bad);
        }
    }
}
