//! Identity provider trait for external platform accounts.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::directory::PlatformProfile;

/// Resolves profile URLs and platform account IDs to a current display name.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve a profile URL (`/profiles/<id>` or `/id/<vanity>`) or a bare
    /// 64-bit platform ID.
    async fn resolve_profile(&self, url_or_id: &str) -> AppResult<PlatformProfile>;
}
