use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Tuning knobs for a refresh run. Consumed, not owned, by the pipeline;
/// the runner assembles it from file/env configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Tokens per cursor batch; also the memory bound of a run
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Concurrent oracle lookups within a batch, independent of batch size
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Backoff applied to batch publish and persist calls
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_batch_size() -> usize {
    100
}

fn default_concurrency() -> usize {
    10
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_per_field() {
        let config: RefreshConfig = serde_json::from_str(r#"{"batch_size": 25}"#).unwrap();
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let config: RefreshConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RefreshConfig::default());
    }
}
