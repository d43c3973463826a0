//! Roster store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the PostgreSQL roster store.
///
/// The CLI runs one command per process, so the pool stays small: a roster
/// check issues one member read and one snapshot upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long to wait for a connection before failing, in seconds.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    /// Refuse to run presence commands until migrations have created the
    /// roster tables.
    #[serde(default = "default_require_schema")]
    pub require_schema: bool,
}

impl DatabaseConfig {
    /// The acquire timeout as a [`Duration`].
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            require_schema: default_require_schema(),
        }
    }
}

fn default_max_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_require_schema() -> bool {
    true
}
