//! Disambiguation and single-player check outcomes.

pub mod outcome;

pub use outcome::{PlayerCheck, ResolvedPlayer};

use serde::{Deserialize, Serialize};

use rustops_core::types::Candidate;

use crate::presence::PresenceStatus;

/// One line of a disambiguation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based rank in the search's sort order.
    pub rank: usize,
    /// The candidate identity.
    pub candidate: Candidate,
    /// The candidate's own presence on the server.
    pub status: PresenceStatus,
}

impl std::fmt::Display for RankedCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {} ({}): {}",
            self.rank, self.candidate.display_name, self.candidate.id, self.status
        )
    }
}

/// Result of reducing a candidate search to a single identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// Exactly one fresh candidate remained.
    SingleMatch(Candidate),
    /// Several fresh candidates remained; one ranked line per candidate.
    MultiMatch(Vec<RankedCandidate>),
    /// No fresh candidate remained.
    NoMatch,
}

impl Resolution {
    /// Render the report lines (empty unless this is a multi match).
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::MultiMatch(ranked) => ranked.iter().map(ToString::to_string).collect(),
            Self::SingleMatch(_) | Self::NoMatch => Vec::new(),
        }
    }
}
