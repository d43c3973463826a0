//! Player identifier handling: classification, name sanitizing, and
//! resolution of an identifier to a directory identity.

pub mod classifier;
pub mod lookup;
pub mod sanitizer;

pub use classifier::classify;
pub use lookup::{IdentityLookup, LookupOutcome, PlayerIdentity};
pub use sanitizer::{ALIAS_PREFIX, is_alias, sanitize};
