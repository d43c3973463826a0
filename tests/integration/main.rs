//! Workspace-level integration tests.
//!
//! Every test runs the real HTTP clients against wiremock servers and keeps
//! roster state in memory.

mod helpers;

mod pagination_test;
mod player_test;
mod roster_test;
mod server_test;
