//! Core type definitions exchanged between the RustOps services and their
//! collaborators.

pub mod directory;
pub mod pagination;
pub mod roster;
pub mod sorting;

pub use directory::{Candidate, PlatformProfile, ServerSummary, SessionRecord};
pub use pagination::{DirectoryPage, SearchLimits};
pub use roster::{ActiveServer, NewRosterMember, RosterMember, RosterSnapshot};
pub use sorting::PlayerSort;
