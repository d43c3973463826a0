//! Roster persistence traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::roster::{ActiveServer, NewRosterMember, RosterMember, RosterSnapshot};

/// Durable roster membership and last-checked snapshots.
///
/// Implementations own their own consistency; the snapshot write is a
/// single-row upsert per roster.
#[async_trait]
pub trait RosterStore: Send + Sync + std::fmt::Debug + 'static {
    /// List the distinct roster names.
    async fn list_roster_names(&self) -> AppResult<Vec<String>>;

    /// Add a member to a roster, creating the roster implicitly.
    async fn add_member(&self, roster: &str, member: &NewRosterMember) -> AppResult<RosterMember>;

    /// Remove the first member of `roster` named `member_name`.
    /// Returns `true` if a member was removed. Removing the last member
    /// also drops the roster's snapshot.
    async fn remove_member(&self, roster: &str, member_name: &str) -> AppResult<bool>;

    /// Find an existing member of `roster` with the same platform or
    /// directory ID.
    async fn find_duplicate(
        &self,
        roster: &str,
        platform_id: Option<&str>,
        directory_id: Option<&str>,
    ) -> AppResult<Option<RosterMember>>;

    /// List the members of a roster in insertion order.
    async fn list_members(&self, roster: &str) -> AppResult<Vec<RosterMember>>;

    /// Insert or replace the snapshot of a roster.
    async fn upsert_snapshot(
        &self,
        roster: &str,
        active_count: i32,
        total_count: i32,
        checked_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Fetch the snapshot of a roster, if it was ever checked.
    async fn get_snapshot(&self, roster: &str) -> AppResult<Option<RosterSnapshot>>;

    /// Delete a roster's members and snapshot. Returns `true` if anything
    /// was deleted.
    async fn delete_roster(&self, roster: &str) -> AppResult<bool>;

    /// Rename a roster. Returns `true` if the roster existed.
    ///
    /// Fails with `Conflict` when `new_name` has members; a snapshot left
    /// under `new_name` without members is replaced.
    async fn rename_roster(&self, old_name: &str, new_name: &str) -> AppResult<bool>;
}

/// Persistence for the single active-server setting.
#[async_trait]
pub trait ActiveServerStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get the active server, if one is set.
    async fn get(&self) -> AppResult<Option<ActiveServer>>;

    /// Replace the active server.
    async fn set(&self, server_id: &str, server_name: &str) -> AppResult<ActiveServer>;

    /// Clear the active server. Returns `true` if one was set.
    async fn clear(&self) -> AppResult<bool>;
}
