//! Resolution of a classified identifier to a directory identity.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use rustops_core::error::ErrorKind;
use rustops_core::result::AppResult;
use rustops_core::traits::{DirectoryService, IdentityProvider};
use rustops_core::types::{Candidate, PlayerSort};
use rustops_entity::identity::{Identifier, IdentifierKind};
use rustops_entity::resolution::{RankedCandidate, Resolution};

use crate::directory::DirectorySearch;
use crate::fanout::with_timeout;
use crate::presence::Disambiguator;

/// A directory identity pinned down from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// The directory candidate.
    pub candidate: Candidate,
    /// Platform account ID, when the input named one.
    pub platform_id: Option<String>,
}

/// Result of looking up an identifier on a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Exactly one identity.
    Identified(PlayerIdentity),
    /// Several plausible identities, ranked with their presence.
    Ambiguous(Vec<RankedCandidate>),
    /// Nothing matched; carries the name or ID that was searched.
    NotFound(String),
}

/// Shared identity resolution used by player checks and roster adds.
#[derive(Debug, Clone)]
pub struct IdentityLookup {
    directory: Arc<dyn DirectoryService>,
    identity: Arc<dyn IdentityProvider>,
    search: Arc<DirectorySearch>,
    disambiguator: Arc<Disambiguator>,
    call_timeout: Duration,
}

impl IdentityLookup {
    /// Creates a new identity lookup.
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        identity: Arc<dyn IdentityProvider>,
        search: Arc<DirectorySearch>,
        disambiguator: Arc<Disambiguator>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            identity,
            search,
            disambiguator,
            call_timeout,
        }
    }

    /// Look up `identifier` on `server_id`.
    ///
    /// Directory IDs are fetched directly. Profile URLs and platform IDs
    /// are resolved to a display name first, which is then searched like
    /// free text. Search failures propagate as `DirectoryUnavailable`.
    pub async fn lookup(&self, identifier: &Identifier, server_id: &str) -> AppResult<LookupOutcome> {
        let raw = identifier.raw_value();

        if identifier.kind() == IdentifierKind::NumericId && !identifier.is_platform_id() {
            let player = with_timeout(
                ErrorKind::DirectoryUnavailable,
                self.call_timeout,
                "player lookup",
                self.directory.get_player(raw),
            )
            .await?;
            return Ok(match player {
                Some(candidate) => LookupOutcome::Identified(PlayerIdentity {
                    candidate,
                    platform_id: None,
                }),
                None => LookupOutcome::NotFound(raw.to_string()),
            });
        }

        let (name, platform_id) = match identifier.kind() {
            IdentifierKind::FreeText => (raw.to_string(), None),
            IdentifierKind::ProfileUrl | IdentifierKind::NumericId => {
                let profile = with_timeout(
                    ErrorKind::IdentityUnavailable,
                    self.call_timeout,
                    "profile lookup",
                    self.identity.resolve_profile(raw),
                )
                .await;
                match profile {
                    Ok(profile) => (profile.display_name, Some(profile.platform_id)),
                    Err(e) if e.is_not_found() => {
                        return Ok(LookupOutcome::NotFound(raw.to_string()));
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        debug!(name = %name, server_id, kind = %identifier.kind(), "Searching candidates");

        let candidates = self
            .search
            .search_candidates_for_server(&name, server_id, PlayerSort::LastSeenDesc)
            .await?;

        Ok(match self.disambiguator.resolve(candidates, server_id).await {
            Resolution::SingleMatch(candidate) => {
                LookupOutcome::Identified(PlayerIdentity {
                    candidate,
                    platform_id,
                })
            }
            Resolution::MultiMatch(ranked) => LookupOutcome::Ambiguous(ranked),
            Resolution::NoMatch => LookupOutcome::NotFound(name),
        })
    }
}
