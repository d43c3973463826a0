//! Lookup tuning configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fan-out and disambiguation settings shared by the presence services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Maximum number of concurrent directory lookups per batch.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Timeout applied to every individual external lookup, in seconds.
    #[serde(default = "default_call_timeout")]
    pub call_timeout_seconds: u64,
    /// Maximum candidates reported in a disambiguation block.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl LookupConfig {
    /// The per-call timeout as a [`Duration`].
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_seconds)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            call_timeout_seconds: default_call_timeout(),
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_concurrency() -> usize {
    4
}

fn default_call_timeout() -> u64 {
    10
}

fn default_max_candidates() -> usize {
    5
}
