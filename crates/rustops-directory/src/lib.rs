//! # rustops-directory
//!
//! HTTP implementations of the RustOps collaborator traits:
//!
//! - [`BattleMetricsClient`] implements [`DirectoryService`] against the
//!   BattleMetrics JSON:API.
//! - [`SteamClient`] implements [`IdentityProvider`] against the Steam Web API.
//!
//! [`DirectoryService`]: rustops_core::traits::DirectoryService
//! [`IdentityProvider`]: rustops_core::traits::IdentityProvider

pub mod battlemetrics;
pub mod http;
pub mod steam;

pub use battlemetrics::BattleMetricsClient;
pub use steam::SteamClient;
