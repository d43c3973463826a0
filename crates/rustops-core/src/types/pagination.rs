//! Pagination types for directory searches.

use serde::{Deserialize, Serialize};

/// One page of directory results plus the provider's link to the next page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryPage<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Opaque link to the next page, if the provider reported one.
    pub next: Option<String>,
}

impl<T> DirectoryPage<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }
}

/// Stop conditions for a paginated search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// A page with fewer items than this is the last page.
    pub page_size: usize,
    /// No further page is requested once this many results are collected.
    pub result_cap: usize,
}

impl SearchLimits {
    /// Create new search limits. Both values are clamped to at least 1.
    pub fn new(page_size: usize, result_cap: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            result_cap: result_cap.max(1),
        }
    }

    /// Whether `page_len` items marks the end of results.
    pub fn is_short_page(&self, page_len: usize) -> bool {
        page_len < self.page_size
    }
}
