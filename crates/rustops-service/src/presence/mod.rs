//! Presence resolution: recency labels, session-based presence, and
//! candidate disambiguation.

pub mod disambiguation;
pub mod recency;
pub mod resolver;

pub use disambiguation::Disambiguator;
pub use recency::{format_recency, format_since_checked};
pub use resolver::PresenceResolver;
