//! BattleMetrics directory client.

pub mod client;
pub mod models;

pub use client::BattleMetricsClient;
