//! Single-player presence checks.

pub mod service;

pub use service::PlayerService;
