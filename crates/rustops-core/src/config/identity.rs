//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// Steam Web API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Steam Web API key. Required by the HTTP client.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
