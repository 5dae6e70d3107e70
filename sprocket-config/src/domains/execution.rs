//! Map execution configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Map execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Maximum number of simultaneously in-flight invocations
    #[serde(default = "default_max_parallelism")]
    pub max_parallelism: usize,

    /// Default retry count applied when an operation supplies no policy
    #[serde(default)]
    pub default_retries: u32,

    /// Optional default per-invocation deadline
    #[serde(with = "humantime_serde", default)]
    pub invocation_timeout: Option<Duration>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_parallelism: default_max_parallelism(),
            default_retries: 0,
            invocation_timeout: None,
        }
    }
}

impl Validatable for ExecutionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.max_parallelism, "max_parallelism", self.domain_name())?;

        if let Some(timeout) = self.invocation_timeout {
            validate_positive(
                timeout.as_millis(),
                "invocation_timeout",
                self.domain_name(),
            )?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "execution"
    }
}

fn default_max_parallelism() -> usize {
    num_cpus::get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ExecutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_parallelism_is_rejected() {
        let config = ExecutionConfig {
            max_parallelism: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_durations() {
        let config: ExecutionConfig =
            serde_yaml::from_str("max_parallelism: 4\ninvocation_timeout: 30s\n").unwrap();
        assert_eq!(config.max_parallelism, 4);
        assert_eq!(config.invocation_timeout, Some(Duration::from_secs(30)));
    }
}
