//! Roster management service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::traits::RosterStore;
use rustops_core::types::{NewRosterMember, RosterMember};
use rustops_entity::roster::{AddMemberOutcome, RosterReport, RosterSummary};

use super::aggregator::RosterAggregator;
use crate::identity::{IdentityLookup, LookupOutcome, classify, sanitize};
use crate::presence::format_since_checked;

/// Manages named rosters and runs roster checks.
#[derive(Debug, Clone)]
pub struct RosterService {
    /// Roster persistence.
    store: Arc<dyn RosterStore>,
    /// Identifier to identity resolution.
    lookup: Arc<IdentityLookup>,
    /// Roster-wide presence aggregation.
    aggregator: Arc<RosterAggregator>,
}

impl RosterService {
    /// Creates a new roster service.
    pub fn new(
        store: Arc<dyn RosterStore>,
        lookup: Arc<IdentityLookup>,
        aggregator: Arc<RosterAggregator>,
    ) -> Self {
        Self {
            store,
            lookup,
            aggregator,
        }
    }

    /// Add the player named by `raw` to `roster`, resolving them on `server_id`.
    ///
    /// Nothing is written for ambiguous or unknown players, or when the
    /// player is already a member by platform or directory ID.
    pub async fn add_member(
        &self,
        roster: &str,
        raw: &str,
        server_id: &str,
    ) -> AppResult<AddMemberOutcome> {
        let roster = require_name(roster)?;
        let identifier = classify(raw)?;

        let identity = match self.lookup.lookup(&identifier, server_id).await? {
            LookupOutcome::Identified(identity) => identity,
            LookupOutcome::Ambiguous(ranked) => return Ok(AddMemberOutcome::Ambiguous(ranked)),
            LookupOutcome::NotFound(query) => return Ok(AddMemberOutcome::NotFound(query)),
        };

        if let Some(existing) = self
            .store
            .find_duplicate(
                roster,
                identity.platform_id.as_deref(),
                Some(identity.candidate.id.as_str()),
            )
            .await?
        {
            return Ok(AddMemberOutcome::AlreadyMember(existing));
        }

        let name = sanitize(&identity.candidate.display_name);
        let alias_applied = name != identity.candidate.display_name;
        let member = self
            .store
            .add_member(
                roster,
                &NewRosterMember {
                    name,
                    platform_id: identity.platform_id,
                    directory_id: Some(identity.candidate.id),
                },
            )
            .await?;

        info!(roster, member = %member.name, alias_applied, "Roster member added");
        Ok(AddMemberOutcome::Added {
            member,
            alias_applied,
        })
    }

    /// Remove the first member of `roster` named `name`.
    pub async fn remove_member(&self, roster: &str, name: &str) -> AppResult<bool> {
        let roster = require_name(roster)?;
        let removed = self.store.remove_member(roster, name.trim()).await?;
        if removed {
            info!(roster, name = name.trim(), "Roster member removed");
        }
        Ok(removed)
    }

    /// Delete a roster with its members and snapshot.
    pub async fn delete_roster(&self, roster: &str) -> AppResult<bool> {
        let roster = require_name(roster)?;
        let deleted = self.store.delete_roster(roster).await?;
        if deleted {
            info!(roster, "Roster deleted");
        }
        Ok(deleted)
    }

    /// Rename a roster. Fails with `Conflict` if `new_name` is taken.
    pub async fn rename_roster(&self, old_name: &str, new_name: &str) -> AppResult<bool> {
        let old_name = require_name(old_name)?;
        let new_name = require_name(new_name)?;
        if old_name == new_name {
            return Err(AppError::conflict(format!("Roster is already named '{new_name}'")));
        }
        let renamed = self.store.rename_roster(old_name, new_name).await?;
        if renamed {
            info!(old_name, new_name, "Roster renamed");
        }
        Ok(renamed)
    }

    /// List the members of a roster in insertion order.
    pub async fn list_members(&self, roster: &str) -> AppResult<Vec<RosterMember>> {
        let roster = require_name(roster)?;
        self.store.list_members(roster).await
    }

    /// Summarize every roster, sorted by name, relative to `now`.
    ///
    /// A roster whose snapshot cannot be read is listed as never checked.
    pub async fn list_rosters(&self, now: DateTime<Utc>) -> AppResult<Vec<RosterSummary>> {
        let mut names = self.store.list_roster_names().await?;
        names.sort();

        let mut summaries = Vec::with_capacity(names.len());
        for (index, roster) in names.into_iter().enumerate() {
            let snapshot = match self.store.get_snapshot(&roster).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(roster = %roster, error = %e, "Failed to read roster snapshot");
                    None
                }
            };
            let since_checked = snapshot
                .as_ref()
                .map(|s| format_since_checked(now, s.checked_at));
            summaries.push(RosterSummary {
                position: index + 1,
                roster,
                snapshot,
                since_checked,
            });
        }
        Ok(summaries)
    }

    /// Check every member of `roster` on `server_id`.
    pub async fn check_roster(&self, roster: &str, server_id: &str) -> AppResult<RosterReport> {
        let roster = require_name(roster)?;
        let members = self.store.list_members(roster).await?;
        if members.is_empty() {
            return Err(AppError::not_found(format!("Roster '{roster}' does not exist")));
        }
        Ok(self.aggregator.check_roster(roster, &members, server_id).await)
    }
}

fn require_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_identifier("A roster name is required"));
    }
    Ok(trimmed)
}
