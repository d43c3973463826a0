//! Candidate disambiguation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use rustops_core::types::Candidate;
use rustops_entity::resolution::{RankedCandidate, Resolution};

use super::recency::format_recency;
use super::resolver::PresenceResolver;
use crate::fanout::ordered_fanout;

/// Narrows a directory search to a single identity, or ranks the plausible
/// ones with their presence.
#[derive(Debug, Clone)]
pub struct Disambiguator {
    /// Presence resolver used for multi-match lines.
    resolver: Arc<PresenceResolver>,
    /// Maximum concurrent presence lookups.
    concurrency: usize,
    /// Maximum candidates reported in a multi-match.
    max_candidates: usize,
}

impl Disambiguator {
    /// Creates a new disambiguator.
    pub fn new(resolver: Arc<PresenceResolver>, concurrency: usize, max_candidates: usize) -> Self {
        Self {
            resolver,
            concurrency,
            max_candidates: max_candidates.max(1),
        }
    }

    /// Resolve `candidates` (in search order) relative to the current time.
    pub async fn resolve(&self, candidates: Vec<Candidate>, server_id: &str) -> Resolution {
        self.resolve_at(candidates, server_id, Utc::now()).await
    }

    /// Resolve `candidates` relative to `now`.
    ///
    /// Candidates the directory has not updated for a month or more are
    /// dropped before counting.
    pub async fn resolve_at(
        &self,
        candidates: Vec<Candidate>,
        server_id: &str,
        now: DateTime<Utc>,
    ) -> Resolution {
        let total = candidates.len();
        let mut fresh: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| !format_recency(now, c.last_updated_at).bucket.is_stale())
            .collect();

        debug!(total, fresh = fresh.len(), server_id, "Filtered stale candidates");

        match fresh.len() {
            0 => Resolution::NoMatch,
            1 => Resolution::SingleMatch(fresh.remove(0)),
            _ => {
                fresh.truncate(self.max_candidates);
                let resolver = self.resolver.as_ref();
                let ranked = ordered_fanout(
                    fresh.into_iter().enumerate(),
                    self.concurrency,
                    |(index, candidate)| async move {
                        let status = resolver
                            .resolve_presence_at(&candidate.id, server_id, now)
                            .await;
                        RankedCandidate {
                            rank: index + 1,
                            candidate,
                            status,
                        }
                    },
                )
                .await;
                Resolution::MultiMatch(ranked)
            }
        }
    }
}
