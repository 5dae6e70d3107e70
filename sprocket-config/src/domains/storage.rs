//! Object storage configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket holding staged state files
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// URI scheme for remote locations
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Optional custom endpoint (e.g. a local MinIO)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Root directory when the filesystem-backed store is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,

    /// Explicit credentials; never read from the process environment at use
    /// sites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialsConfig>,
}

/// Explicit object-store credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            scheme: default_scheme(),
            endpoint_url: None,
            local_root: None,
            credentials: None,
        }
    }
}

impl Validatable for StorageConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bucket, "bucket", self.domain_name())?;
        validate_required_string(&self.scheme, "scheme", self.domain_name())?;

        if let Some(ref endpoint) = self.endpoint_url {
            validate_url(endpoint, "endpoint_url", self.domain_name())?;
        }

        if let Some(ref credentials) = self.credentials {
            validate_required_string(
                &credentials.access_key_id,
                "credentials.access_key_id",
                self.domain_name(),
            )?;
            validate_required_string(
                &credentials.secret_access_key,
                "credentials.secret_access_key",
                self.domain_name(),
            )?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "storage"
    }
}

fn default_bucket() -> String {
    "sprocket".to_string()
}

fn default_scheme() -> String {
    "s3".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_endpoint_is_rejected() {
        let config = StorageConfig {
            endpoint_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_credential_field_is_rejected() {
        let config = StorageConfig {
            credentials: Some(CredentialsConfig {
                access_key_id: "minio".to_string(),
                secret_access_key: String::new(),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
