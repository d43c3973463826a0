//! Service wiring.

use std::sync::Arc;

use rustops_core::config::{DirectoryConfig, LookupConfig};
use rustops_core::traits::{ActiveServerStore, DirectoryService, IdentityProvider, RosterStore};

use crate::directory::DirectorySearch;
use crate::identity::IdentityLookup;
use crate::player::PlayerService;
use crate::presence::{Disambiguator, PresenceResolver};
use crate::roster::{RosterAggregator, RosterService};
use crate::server::ServerService;

/// Collaborators injected into [`AppServices::build`].
#[derive(Debug, Clone)]
pub struct Collaborators {
    /// Directory service.
    pub directory: Arc<dyn DirectoryService>,
    /// Identity provider.
    pub identity: Arc<dyn IdentityProvider>,
    /// Roster store.
    pub rosters: Arc<dyn RosterStore>,
    /// Active server store.
    pub active_server: Arc<dyn ActiveServerStore>,
}

/// The application services, constructed once and shared by every command.
#[derive(Debug, Clone)]
pub struct AppServices {
    /// Single player checks.
    pub players: Arc<PlayerService>,
    /// Roster management and checks.
    pub rosters: Arc<RosterService>,
    /// Server search and active server.
    pub servers: Arc<ServerService>,
}

impl AppServices {
    /// Build every service from its collaborators and configuration.
    pub fn build(collaborators: Collaborators, directory: &DirectoryConfig, lookup: &LookupConfig) -> Self {
        let Collaborators {
            directory: directory_service,
            identity,
            rosters,
            active_server,
        } = collaborators;
        let timeout = lookup.call_timeout();

        let resolver = Arc::new(PresenceResolver::new(directory_service.clone(), timeout));
        let search = Arc::new(DirectorySearch::new(
            directory_service.clone(),
            directory.page_size,
            directory.candidate_result_cap,
            timeout,
        ));
        let disambiguator = Arc::new(Disambiguator::new(
            resolver.clone(),
            lookup.concurrency,
            lookup.max_candidates,
        ));
        let identity_lookup = Arc::new(IdentityLookup::new(
            directory_service,
            identity.clone(),
            search.clone(),
            disambiguator,
            timeout,
        ));
        let aggregator = Arc::new(RosterAggregator::new(
            identity,
            search.clone(),
            resolver.clone(),
            rosters.clone(),
            lookup.concurrency,
            timeout,
        ));

        Self {
            players: Arc::new(PlayerService::new(identity_lookup.clone(), resolver)),
            rosters: Arc::new(RosterService::new(rosters, identity_lookup, aggregator)),
            servers: Arc::new(ServerService::new(search, active_server)),
        }
    }
}
