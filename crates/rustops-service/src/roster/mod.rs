//! Roster membership and roster presence checks.

pub mod aggregator;
pub mod service;

pub use aggregator::RosterAggregator;
pub use service::RosterService;
