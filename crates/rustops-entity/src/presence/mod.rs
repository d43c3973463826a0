//! Presence domain values.

pub mod recency;

pub use recency::{BucketKind, Recency};

use serde::{Deserialize, Serialize};

/// Why a presence state could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnknownReason {
    /// The directory returned no sessions for the identity on the server.
    NoSessionData,
    /// The session query failed or timed out.
    LookupFailed(String),
    /// The identity could not be resolved to a directory ID.
    IdentityUnresolved(String),
    /// A roster member stored only by display name was not found under
    /// that name on the server.
    UnverifiedName,
}

impl std::fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSessionData => write!(f, "no session data"),
            Self::LookupFailed(detail) => write!(f, "lookup failed: {detail}"),
            Self::IdentityUnresolved(detail) => write!(f, "identity unresolved: {detail}"),
            Self::UnverifiedName => write!(f, "stored name not found on server"),
        }
    }
}

/// Presence of an identity on a server, derived from its newest session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PresenceStatus {
    /// The newest session has no stop time.
    Active,
    /// The newest session ended; carries the time since it ended.
    LastSeen(Recency),
    /// Presence could not be determined.
    Unknown(UnknownReason),
}

impl PresenceStatus {
    /// Check if the identity is currently connected.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if the status is a degraded, undetermined state.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Shorthand for a failed lookup.
    pub fn lookup_failed(detail: impl Into<String>) -> Self {
        Self::Unknown(UnknownReason::LookupFailed(detail.into()))
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::LastSeen(recency) => write!(f, "last seen {}", recency.label),
            Self::Unknown(reason) => write!(f, "unknown ({reason})"),
        }
    }
}
