//! Records returned by the directory service and identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory search hit not yet confirmed as the intended identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Directory identity ID.
    pub id: String,
    /// Display name as last seen by the directory.
    pub display_name: String,
    /// When the directory last updated this identity.
    pub last_updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        last_updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            last_updated_at,
        }
    }
}

/// One connect/disconnect interval for an identity on a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session started.
    pub start: DateTime<Utc>,
    /// When the session ended; `None` while still connected.
    pub stop: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Whether the identity is still connected in this session.
    pub fn is_open(&self) -> bool {
        self.stop.is_none()
    }
}

/// A game server search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    /// Directory server ID.
    pub id: String,
    /// Server display name.
    pub name: String,
}

impl ServerSummary {
    /// Create a server summary.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An external platform account as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// 64-bit platform account ID.
    pub platform_id: String,
    /// Current display (persona) name.
    pub display_name: String,
}
