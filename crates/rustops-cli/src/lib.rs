//! # rustops-cli
//!
//! Command tree and terminal output for the `rustops` binary.

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::OutputFormat;
