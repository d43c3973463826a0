//! # rustops-service
//!
//! Presence resolution services for RustOps. Each service orchestrates the
//! collaborator traits from `rustops-core` to answer one question: is this
//! player, or this roster of players, on the server right now?
//!
//! Services follow constructor injection; all collaborators are provided
//! at construction time as `Arc<dyn Trait>`.

pub mod context;
pub mod directory;
pub mod fanout;
pub mod identity;
pub mod player;
pub mod presence;
pub mod roster;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{AppServices, Collaborators};
pub use directory::DirectorySearch;
pub use identity::{IdentityLookup, classify, sanitize};
pub use player::PlayerService;
pub use presence::{Disambiguator, PresenceResolver, format_recency, format_since_checked};
pub use roster::{RosterAggregator, RosterService};
pub use server::ServerService;
