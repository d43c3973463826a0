//! Roster check report and list summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rustops_core::types::RosterSnapshot;

use crate::presence::{PresenceStatus, Recency};

/// Which identity path was used to look up a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSource {
    /// The stored directory ID.
    DirectoryId,
    /// The display name resolved from the stored platform ID.
    PlatformProfile,
    /// The stored display name only; renamed players are not detected.
    StoredName,
}

impl MemberSource {
    /// Whether this lookup path verified the identity.
    pub fn is_verified(&self) -> bool {
        !matches!(self, Self::StoredName)
    }
}

/// One member's line in a roster check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterLine {
    /// Stored member name.
    pub member_name: String,
    /// Lookup path used.
    pub source: MemberSource,
    /// Directory ID the lookup settled on, if any.
    pub directory_id: Option<String>,
    /// Presence on the checked server.
    pub status: PresenceStatus,
    /// False when the identity was only matched by stored display name.
    pub verified: bool,
}

impl RosterLine {
    /// Create a line; `verified` follows from `source`.
    pub fn new(
        member_name: impl Into<String>,
        source: MemberSource,
        directory_id: Option<String>,
        status: PresenceStatus,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            source,
            directory_id,
            status,
            verified: source.is_verified(),
        }
    }
}

impl std::fmt::Display for RosterLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.member_name, self.status)?;
        if !self.verified {
            write!(f, " [unverified]")?;
        }
        Ok(())
    }
}

/// The result of checking every member of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterReport {
    /// Roster name.
    pub roster: String,
    /// One line per member, in roster order.
    pub lines: Vec<RosterLine>,
    /// Members found active.
    pub active_count: usize,
    /// Members checked; always `lines.len()`.
    pub total_count: usize,
    /// When the check completed.
    pub checked_at: DateTime<Utc>,
    /// Set when the snapshot could not be stored.
    pub snapshot_error: Option<String>,
}

impl RosterReport {
    /// Report header, e.g. `"raiders ACTIVE PLAYERS: (2 / 5)"`.
    pub fn header(&self) -> String {
        format!(
            "{} ACTIVE PLAYERS: ({} / {})",
            self.roster, self.active_count, self.total_count
        )
    }

    /// Render each member line.
    pub fn render_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

/// One roster in the roster listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// 1-based position in the listing.
    pub position: usize,
    /// Roster name.
    pub roster: String,
    /// Last snapshot, or `None` if never checked (or unreadable).
    pub snapshot: Option<RosterSnapshot>,
    /// Time since the last check.
    pub since_checked: Option<Recency>,
}

impl std::fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (active, total) = self
            .snapshot
            .as_ref()
            .map(|s| (s.active_count, s.total_count))
            .unwrap_or((0, 0));
        let since = self
            .since_checked
            .as_ref()
            .map(|r| r.label.as_str())
            .unwrap_or("Never");
        write!(
            f,
            "{}. {} ({}/{}) : {}",
            self.position, self.roster, active, total, since
        )
    }
}
