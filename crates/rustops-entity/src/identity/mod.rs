//! Classified player identifiers.

pub mod identifier;

pub use identifier::{Identifier, IdentifierKind};
