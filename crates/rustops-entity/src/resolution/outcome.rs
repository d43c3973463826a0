//! Single-player check outcome.

use serde::{Deserialize, Serialize};

use rustops_core::types::Candidate;

use super::RankedCandidate;
use crate::presence::PresenceStatus;

/// A confirmed identity and its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlayer {
    /// The identity the input resolved to.
    pub candidate: Candidate,
    /// Presence on the checked server.
    pub status: PresenceStatus,
}

impl std::fmt::Display for ResolvedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.candidate.display_name, self.candidate.id, self.status
        )
    }
}

/// Outcome of checking one player identifier against a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum PlayerCheck {
    /// The input resolved to exactly one identity.
    Resolved(ResolvedPlayer),
    /// The input matched several fresh identities.
    Ambiguous(Vec<RankedCandidate>),
    /// Nothing matched the input on the server.
    NotFound(String),
}

impl PlayerCheck {
    /// Render the outcome as presentation lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Resolved(player) => vec![player.to_string()],
            Self::Ambiguous(ranked) => ranked.iter().map(ToString::to_string).collect(),
            Self::NotFound(query) => vec![format!("No matching players found for '{query}'")],
        }
    }
}
