//! Player check service.

use std::sync::Arc;

use tracing::info;

use rustops_core::result::AppResult;
use rustops_entity::resolution::{PlayerCheck, ResolvedPlayer};

use crate::identity::{IdentityLookup, LookupOutcome, classify};
use crate::presence::PresenceResolver;

/// Checks whether a single player is on a server.
#[derive(Debug, Clone)]
pub struct PlayerService {
    /// Identifier to identity resolution.
    lookup: Arc<IdentityLookup>,
    /// Presence resolver.
    resolver: Arc<PresenceResolver>,
}

impl PlayerService {
    /// Creates a new player service.
    pub fn new(lookup: Arc<IdentityLookup>, resolver: Arc<PresenceResolver>) -> Self {
        Self { lookup, resolver }
    }

    /// Check the presence of the player named by `raw` on `server_id`.
    ///
    /// Fails with `InvalidIdentifier` for unusable input and with
    /// `DirectoryUnavailable` when the candidate search fails.
    pub async fn check_player(&self, raw: &str, server_id: &str) -> AppResult<PlayerCheck> {
        let identifier = classify(raw)?;
        info!(kind = %identifier.kind(), server_id, "Checking player");

        Ok(match self.lookup.lookup(&identifier, server_id).await? {
            LookupOutcome::Identified(identity) => {
                let status = self
                    .resolver
                    .resolve_presence(&identity.candidate.id, server_id)
                    .await;
                PlayerCheck::Resolved(ResolvedPlayer {
                    candidate: identity.candidate,
                    status,
                })
            }
            LookupOutcome::Ambiguous(ranked) => PlayerCheck::Ambiguous(ranked),
            LookupOutcome::NotFound(query) => PlayerCheck::NotFound(query),
        })
    }
}
