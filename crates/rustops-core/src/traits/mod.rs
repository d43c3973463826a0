//! Collaborator traits defined in `rustops-core` and implemented by other crates.

pub mod directory;
pub mod identity;
pub mod roster;

pub use directory::DirectoryService;
pub use identity::IdentityProvider;
pub use roster::{ActiveServerStore, RosterStore};
