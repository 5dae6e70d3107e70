//! Configuration loading and environment variable handling

use crate::domains::SprocketConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SPROCKET".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SprocketConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SprocketConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SprocketConfig> {
        let mut config = SprocketConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SprocketConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SprocketConfig) -> ConfigResult<()> {
        if let Ok(parallelism) = self.get_env_var("MAX_PARALLELISM") {
            config.execution.max_parallelism = parallelism.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid MAX_PARALLELISM: {}", e))
            })?;
        }

        if let Ok(retries) = self.get_env_var("DEFAULT_RETRIES") {
            config.execution.default_retries = retries
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid DEFAULT_RETRIES: {}", e)))?;
        }

        if let Ok(timeout) = self.get_env_var("INVOCATION_TIMEOUT_SECONDS") {
            let seconds: u64 = timeout.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid INVOCATION_TIMEOUT_SECONDS: {}", e))
            })?;
            config.execution.invocation_timeout = Some(std::time::Duration::from_secs(seconds));
        }

        if let Ok(bucket) = self.get_env_var("STORAGE_BUCKET") {
            config.storage.bucket = bucket;
        }

        if let Ok(endpoint) = self.get_env_var("STORAGE_ENDPOINT") {
            config.storage.endpoint_url = Some(endpoint);
        }

        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.logging.level = serde_yaml::from_str(&level)
                .map_err(|e| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", e)))?;
        }

        Ok(())
    }

    fn get_env_var(&self, suffix: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, suffix))
    }
}
