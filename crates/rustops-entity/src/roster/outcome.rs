//! Roster membership outcomes.

use serde::{Deserialize, Serialize};

use rustops_core::types::RosterMember;

use crate::resolution::RankedCandidate;

/// Outcome of adding a player to a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum AddMemberOutcome {
    /// The member was stored.
    Added {
        /// The stored member.
        member: RosterMember,
        /// Whether the display name was replaced by an alias.
        alias_applied: bool,
    },
    /// The roster already tracks this identity.
    AlreadyMember(RosterMember),
    /// The input matched several identities; nothing was stored.
    Ambiguous(Vec<RankedCandidate>),
    /// The input matched nothing; nothing was stored.
    NotFound(String),
}
