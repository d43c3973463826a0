//! Session-based presence resolution.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use rustops_core::error::ErrorKind;
use rustops_core::traits::DirectoryService;
use rustops_entity::presence::{PresenceStatus, UnknownReason};

use super::recency::format_recency;
use crate::fanout::with_timeout;

/// Derives a [`PresenceStatus`] from an identity's sessions on a server.
///
/// This is the only presence rule: single checks, disambiguation lines,
/// and roster lines all go through it.
#[derive(Debug, Clone)]
pub struct PresenceResolver {
    /// Directory service.
    directory: Arc<dyn DirectoryService>,
    /// Per-call timeout.
    call_timeout: Duration,
}

impl PresenceResolver {
    /// Creates a new presence resolver.
    pub fn new(directory: Arc<dyn DirectoryService>, call_timeout: Duration) -> Self {
        Self {
            directory,
            call_timeout,
        }
    }

    /// Resolve presence relative to the current time.
    pub async fn resolve_presence(&self, identity_id: &str, server_id: &str) -> PresenceStatus {
        self.resolve_presence_at(identity_id, server_id, Utc::now())
            .await
    }

    /// Resolve presence relative to `now`. Never fails; lookup failures
    /// become [`UnknownReason::LookupFailed`].
    pub async fn resolve_presence_at(
        &self,
        identity_id: &str,
        server_id: &str,
        now: DateTime<Utc>,
    ) -> PresenceStatus {
        let sessions = with_timeout(
            ErrorKind::DirectoryUnavailable,
            self.call_timeout,
            "session lookup",
            self.directory.get_sessions(identity_id, server_id),
        )
        .await;

        let sessions = match sessions {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(identity_id, server_id, error = %e, "Session lookup failed");
                return PresenceStatus::lookup_failed(e.message);
            }
        };

        let Some(newest) = sessions.iter().max_by_key(|s| s.start) else {
            debug!(identity_id, server_id, "No sessions on server");
            return PresenceStatus::Unknown(UnknownReason::NoSessionData);
        };

        match newest.stop {
            None => PresenceStatus::Active,
            Some(stop) => PresenceStatus::LastSeen(format_recency(now, stop)),
        }
    }
}
