//! # rustops-core
//!
//! Core crate for RustOps. Contains the collaborator traits consumed by the
//! presence resolution services, configuration schemas, shared pagination
//! and sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RustOps crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
