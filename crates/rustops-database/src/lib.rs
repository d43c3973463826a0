//! # rustops-database
//!
//! PostgreSQL connection management, migrations, and the roster and
//! active-server store implementations for RustOps.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, SchemaStatus};
pub use store::PgRosterStore;
