//! Roster store records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked member of a named roster.
///
/// At least one of `platform_id`/`directory_id` should be set; a member
/// carrying only `name` is a legacy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RosterMember {
    /// Row ID.
    pub id: Uuid,
    /// Roster name.
    pub roster: String,
    /// Sanitized display name at the time the member was added.
    pub name: String,
    /// External platform account ID.
    pub platform_id: Option<String>,
    /// Directory identity ID.
    pub directory_id: Option<String>,
    /// When the member was added.
    pub created_at: DateTime<Utc>,
}

impl RosterMember {
    /// Whether the member can only be looked up by stored name.
    pub fn is_name_only(&self) -> bool {
        self.platform_id.is_none() && self.directory_id.is_none()
    }
}

/// Data required to add a roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRosterMember {
    /// Sanitized display name.
    pub name: String,
    /// External platform account ID.
    pub platform_id: Option<String>,
    /// Directory identity ID.
    pub directory_id: Option<String>,
}

/// The last computed active/total counts for a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RosterSnapshot {
    /// Roster name.
    pub roster: String,
    /// Members found active in the last check.
    pub active_count: i32,
    /// Members checked in the last check.
    pub total_count: i32,
    /// When the last check completed.
    pub checked_at: DateTime<Utc>,
}

/// The server every player and roster check runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ActiveServer {
    /// Directory server ID.
    pub server_id: String,
    /// Server display name.
    pub server_name: String,
    /// When the server was selected.
    pub set_at: DateTime<Utc>,
}
