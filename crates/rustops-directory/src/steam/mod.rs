//! Steam Web API identity provider.

pub mod client;
pub mod models;

pub use client::SteamClient;
