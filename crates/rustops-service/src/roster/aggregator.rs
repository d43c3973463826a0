//! Roster-wide presence aggregation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use rustops_core::error::ErrorKind;
use rustops_core::traits::{IdentityProvider, RosterStore};
use rustops_core::types::RosterMember;
use rustops_entity::presence::{PresenceStatus, UnknownReason};
use rustops_entity::roster::{MemberSource, RosterLine, RosterReport};

use crate::directory::DirectorySearch;
use crate::fanout::{ordered_fanout, with_timeout};
use crate::presence::PresenceResolver;

/// Resolves every member of a roster and records the resulting counts.
#[derive(Debug, Clone)]
pub struct RosterAggregator {
    /// Identity provider for platform-only members.
    identity: Arc<dyn IdentityProvider>,
    /// Directory search for name lookups.
    search: Arc<DirectorySearch>,
    /// Presence resolver.
    resolver: Arc<PresenceResolver>,
    /// Snapshot sink.
    store: Arc<dyn RosterStore>,
    /// Maximum concurrent member resolutions.
    concurrency: usize,
    /// Per-call timeout for identity lookups.
    call_timeout: Duration,
}

impl RosterAggregator {
    /// Creates a new roster aggregator.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        search: Arc<DirectorySearch>,
        resolver: Arc<PresenceResolver>,
        store: Arc<dyn RosterStore>,
        concurrency: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            search,
            resolver,
            store,
            concurrency,
            call_timeout,
        }
    }

    /// Check `members` of `roster` on `server_id` relative to the current time.
    pub async fn check_roster(
        &self,
        roster: &str,
        members: &[RosterMember],
        server_id: &str,
    ) -> RosterReport {
        self.check_roster_at(roster, members, server_id, Utc::now())
            .await
    }

    /// Check `members` relative to `now`.
    ///
    /// Produces one line per member in input order. A member that cannot be
    /// resolved yields an `Unknown` line; nothing here fails the batch. The
    /// snapshot is written exactly once, after all members.
    pub async fn check_roster_at(
        &self,
        roster: &str,
        members: &[RosterMember],
        server_id: &str,
        now: DateTime<Utc>,
    ) -> RosterReport {
        let lines = ordered_fanout(members, self.concurrency, |member| {
            self.check_member(member, server_id, now)
        })
        .await;

        let active_count = lines.iter().filter(|l| l.status.is_active()).count();
        let total_count = members.len();

        let snapshot_error = match self
            .store
            .upsert_snapshot(
                roster,
                i32::try_from(active_count).unwrap_or(i32::MAX),
                i32::try_from(total_count).unwrap_or(i32::MAX),
                now,
            )
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!(roster, error = %e, "Failed to record roster snapshot");
                Some(e.to_string())
            }
        };

        info!(roster, server_id, active_count, total_count, "Roster checked");

        RosterReport {
            roster: roster.to_string(),
            lines,
            active_count,
            total_count,
            checked_at: now,
            snapshot_error,
        }
    }

    async fn check_member(
        &self,
        member: &RosterMember,
        server_id: &str,
        now: DateTime<Utc>,
    ) -> RosterLine {
        if let Some(directory_id) = &member.directory_id {
            let status = self
                .resolver
                .resolve_presence_at(directory_id, server_id, now)
                .await;
            return RosterLine::new(
                member.name.clone(),
                MemberSource::DirectoryId,
                Some(directory_id.clone()),
                status,
            );
        }

        if let Some(platform_id) = &member.platform_id {
            let profile = with_timeout(
                ErrorKind::IdentityUnavailable,
                self.call_timeout,
                "profile lookup",
                self.identity.resolve_profile(platform_id),
            )
            .await;

            return match profile {
                Ok(profile) => {
                    let (directory_id, status) = self
                        .resolve_by_name(&profile.display_name, server_id, now, || {
                            UnknownReason::IdentityUnresolved(format!(
                                "'{}' not found on server",
                                profile.display_name
                            ))
                        })
                        .await;
                    RosterLine::new(
                        profile.display_name,
                        MemberSource::PlatformProfile,
                        directory_id,
                        status,
                    )
                }
                Err(e) => {
                    warn!(platform_id, error = %e, "Profile lookup failed");
                    RosterLine::new(
                        member.name.clone(),
                        MemberSource::PlatformProfile,
                        None,
                        PresenceStatus::Unknown(UnknownReason::IdentityUnresolved(e.message)),
                    )
                }
            };
        }

        let (directory_id, status) = self
            .resolve_by_name(&member.name, server_id, now, || UnknownReason::UnverifiedName)
            .await;
        RosterLine::new(member.name.clone(), MemberSource::StoredName, directory_id, status)
    }

    /// Look a display name up on the server and resolve its presence.
    async fn resolve_by_name(
        &self,
        name: &str,
        server_id: &str,
        now: DateTime<Utc>,
        not_found: impl FnOnce() -> UnknownReason,
    ) -> (Option<String>, PresenceStatus) {
        match self.search.find_exact(name, server_id).await {
            Ok(Some(candidate)) => {
                let status = self
                    .resolver
                    .resolve_presence_at(&candidate.id, server_id, now)
                    .await;
                (Some(candidate.id), status)
            }
            Ok(None) => (None, PresenceStatus::Unknown(not_found())),
            Err(e) => {
                warn!(name, error = %e, "Name lookup failed");
                (None, PresenceStatus::lookup_failed(e.message))
            }
        }
    }
}
