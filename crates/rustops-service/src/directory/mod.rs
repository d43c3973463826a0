//! Paginated directory searches.

pub mod search;

pub use search::{DirectorySearch, SERVER_RESULT_CAP};
