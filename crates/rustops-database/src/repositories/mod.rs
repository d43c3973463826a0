//! Repository implementations for RustOps persistence.

pub mod active_server;
pub mod roster;
pub mod snapshot;

pub use active_server::ActiveServerRepository;
pub use roster::RosterMemberRepository;
pub use snapshot::RosterSnapshotRepository;
