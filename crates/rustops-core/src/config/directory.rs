//! Directory service configuration.

use serde::{Deserialize, Serialize};

/// BattleMetrics directory client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token. Required by the HTTP client.
    #[serde(default, skip_serializing)]
    pub token: String,
    /// Items requested per page; a shorter page marks the last one.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Accumulated result cap for player candidate searches.
    #[serde(default = "default_candidate_result_cap")]
    pub candidate_result_cap: usize,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            page_size: default_page_size(),
            candidate_result_cap: default_candidate_result_cap(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.battlemetrics.com".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_candidate_result_cap() -> usize {
    50
}

fn default_request_timeout() -> u64 {
    10
}
