//! Shared reqwest client construction.

use std::time::Duration;

use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;

/// User agent sent with every outbound request.
const USER_AGENT: &str = concat!("rustops/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with the given per-request timeout.
pub fn build_client(timeout_seconds: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_seconds.max(1)))
        .build()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e))
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
