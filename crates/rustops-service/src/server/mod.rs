//! Server search and the active server setting.

pub mod service;

pub use service::ServerService;
