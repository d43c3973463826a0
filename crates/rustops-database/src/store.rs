//! PostgreSQL-backed [`RosterStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use rustops_core::result::AppResult;
use rustops_core::traits::RosterStore;
use rustops_core::types::{NewRosterMember, RosterMember, RosterSnapshot};

use crate::repositories::{RosterMemberRepository, RosterSnapshotRepository};

/// Roster store composed of the member and snapshot repositories.
#[derive(Debug, Clone)]
pub struct PgRosterStore {
    /// Member rows.
    members: Arc<RosterMemberRepository>,
    /// Snapshot rows.
    snapshots: Arc<RosterSnapshotRepository>,
}

impl PgRosterStore {
    /// Create a store over existing repositories.
    pub fn new(
        members: Arc<RosterMemberRepository>,
        snapshots: Arc<RosterSnapshotRepository>,
    ) -> Self {
        Self { members, snapshots }
    }

    /// Create a store and its repositories from a pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(RosterMemberRepository::new(pool.clone())),
            Arc::new(RosterSnapshotRepository::new(pool)),
        )
    }
}

#[async_trait]
impl RosterStore for PgRosterStore {
    async fn list_roster_names(&self) -> AppResult<Vec<String>> {
        self.members.distinct_rosters().await
    }

    async fn add_member(&self, roster: &str, member: &NewRosterMember) -> AppResult<RosterMember> {
        debug!(roster, name = %member.name, "Adding roster member");
        self.members.create(roster, member).await
    }

    async fn remove_member(&self, roster: &str, member_name: &str) -> AppResult<bool> {
        self.members.delete_first_by_name(roster, member_name).await
    }

    async fn find_duplicate(
        &self,
        roster: &str,
        platform_id: Option<&str>,
        directory_id: Option<&str>,
    ) -> AppResult<Option<RosterMember>> {
        self.members
            .find_by_external_ids(roster, platform_id, directory_id)
            .await
    }

    async fn list_members(&self, roster: &str) -> AppResult<Vec<RosterMember>> {
        self.members.find_by_roster(roster).await
    }

    async fn upsert_snapshot(
        &self,
        roster: &str,
        active_count: i32,
        total_count: i32,
        checked_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.snapshots
            .upsert(roster, active_count, total_count, checked_at)
            .await
    }

    async fn get_snapshot(&self, roster: &str) -> AppResult<Option<RosterSnapshot>> {
        self.snapshots.find_by_roster(roster).await
    }

    async fn delete_roster(&self, roster: &str) -> AppResult<bool> {
        self.members.delete_roster(roster).await
    }

    async fn rename_roster(&self, old_name: &str, new_name: &str) -> AppResult<bool> {
        self.members.rename_roster(old_name, new_name).await
    }
}
