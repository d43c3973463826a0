//! # rustops-entity
//!
//! Domain value objects for RustOps. Everything in this crate is derived
//! per request from directory and roster records and is never persisted
//! directly: classified identifiers, presence states, disambiguation
//! outcomes, and roster reports.

pub mod identity;
pub mod presence;
pub mod resolution;
pub mod roster;
