//! Sorting types for player searches.

use serde::{Deserialize, Serialize};

/// Sort order requested from the directory for player searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSort {
    /// Most recently seen first.
    #[default]
    LastSeenDesc,
    /// Least recently seen first.
    LastSeenAsc,
    /// Alphabetical by display name.
    NameAsc,
    /// Provider relevance ranking.
    Relevance,
}

impl PlayerSort {
    /// Return the directory query parameter for this order.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::LastSeenDesc => "-lastSeen",
            Self::LastSeenAsc => "lastSeen",
            Self::NameAsc => "name",
            Self::Relevance => "relevance",
        }
    }
}

impl std::fmt::Display for PlayerSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}
