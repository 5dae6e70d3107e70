//! Per-operation execution policy

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backoff::RetryBackoff;

/// Policy applied uniformly to every invocation of one map operation
///
/// A plain value object: it is fixed before fan-out begins and never mutated
/// during execution. The memory fields are advisory hints for whatever
/// substrate runs the invocation; the executor propagates them unchanged and
/// does not enforce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionPolicy {
    /// Number of retries per invocation after the first attempt
    pub retries: u32,

    /// Advisory memory request (e.g. "300Mi")
    pub memory_request: Option<String>,

    /// Advisory memory limit (e.g. "500Mi")
    pub memory_limit: Option<String>,

    /// Optional per-invocation deadline; exceeding it counts as a failure
    /// eligible for retry
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// Pacing between retry attempts
    pub backoff: RetryBackoff,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            memory_request: None,
            memory_limit: None,
            timeout: None,
            backoff: RetryBackoff::default(),
        }
    }
}

impl ExecutionPolicy {
    /// Policy with the given retry count and defaults elsewhere
    pub fn with_retries(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }

    /// Derive a policy from the execution configuration domain
    pub fn from_config(config: &sprocket_config::ExecutionConfig) -> Self {
        Self {
            retries: config.default_retries,
            timeout: config.invocation_timeout,
            ..Self::default()
        }
    }

    /// Total attempts an invocation may make under this policy
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_single_attempt() {
        let policy = ExecutionPolicy::default();
        assert_eq!(policy.retries, 0);
        assert_eq!(policy.max_attempts(), 1);
        assert!(policy.memory_request.is_none());
    }

    #[test]
    fn test_yaml_round_trip() {
        let policy = ExecutionPolicy {
            retries: 1,
            memory_request: Some("300Mi".to_string()),
            memory_limit: Some("500Mi".to_string()),
            timeout: Some(Duration::from_secs(30)),
            backoff: RetryBackoff::none(),
        };

        let yaml = serde_yaml::to_string(&policy).unwrap();
        let back: ExecutionPolicy = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, policy);
    }
}
