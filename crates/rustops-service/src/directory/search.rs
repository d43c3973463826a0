//! Server and player searches across directory pages.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use rustops_core::error::ErrorKind;
use rustops_core::result::AppResult;
use rustops_core::traits::DirectoryService;
use rustops_core::types::{Candidate, DirectoryPage, PlayerSort, SearchLimits, ServerSummary};

use crate::fanout::with_timeout;

/// Accumulated result cap for server searches.
pub const SERVER_RESULT_CAP: usize = 25;

/// Runs paginated searches against the directory service.
#[derive(Debug, Clone)]
pub struct DirectorySearch {
    /// Directory service.
    directory: Arc<dyn DirectoryService>,
    /// Stop conditions for server searches.
    server_limits: SearchLimits,
    /// Stop conditions for player candidate searches.
    candidate_limits: SearchLimits,
    /// Per-request timeout.
    call_timeout: Duration,
}

impl DirectorySearch {
    /// Creates a new directory search.
    ///
    /// `page_size` is the provider's full-page size; `candidate_cap` bounds
    /// player candidate searches.
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        page_size: usize,
        candidate_cap: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            server_limits: SearchLimits::new(page_size, SERVER_RESULT_CAP),
            candidate_limits: SearchLimits::new(page_size, candidate_cap),
            call_timeout,
        }
    }

    /// Search servers by name.
    ///
    /// Returns servers in first-seen order; a name reported twice keeps the
    /// last ID seen.
    pub async fn search_by_name(&self, query: &str) -> AppResult<Vec<ServerSummary>> {
        let directory = Arc::clone(&self.directory);
        let servers = paginate(self.server_limits, self.call_timeout, |page| {
            let directory = Arc::clone(&directory);
            let query = query.to_string();
            async move { directory.search_servers(&query, page.as_deref()).await }
        })
        .await?;

        let mut ordered: Vec<ServerSummary> = Vec::with_capacity(servers.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for server in servers {
            match positions.get(&server.name) {
                Some(&index) => ordered[index].id = server.id,
                None => {
                    positions.insert(server.name.clone(), ordered.len());
                    ordered.push(server);
                }
            }
        }
        Ok(ordered)
    }

    /// Search player candidates by name on a server, in directory order.
    pub async fn search_candidates_for_server(
        &self,
        name: &str,
        server_id: &str,
        sort: PlayerSort,
    ) -> AppResult<Vec<Candidate>> {
        let directory = Arc::clone(&self.directory);
        paginate(self.candidate_limits, self.call_timeout, |page| {
            let directory = Arc::clone(&directory);
            let name = name.to_string();
            let server_id = server_id.to_string();
            async move {
                directory
                    .search_players(&name, &server_id, sort, page.as_deref())
                    .await
            }
        })
        .await
    }

    /// Find the candidate on a server whose display name is `name`.
    ///
    /// An exact match wins over a case-insensitive one.
    pub async fn find_exact(&self, name: &str, server_id: &str) -> AppResult<Option<Candidate>> {
        let candidates = self
            .search_candidates_for_server(name, server_id, PlayerSort::LastSeenDesc)
            .await?;

        if let Some(exact) = candidates.iter().find(|c| c.display_name == name) {
            return Ok(Some(exact.clone()));
        }
        let lower = name.to_lowercase();
        Ok(candidates
            .into_iter()
            .find(|c| c.display_name.to_lowercase() == lower))
    }
}

/// Fetch pages until the cap is reached, a short page arrives, or no next
/// link is given. Any failed page fails the whole search.
async fn paginate<T, F, Fut>(
    limits: SearchLimits,
    call_timeout: Duration,
    mut fetch: F,
) -> AppResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = AppResult<DirectoryPage<T>>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut next: Option<String> = None;
    let mut requests = 0usize;

    while items.len() < limits.result_cap {
        let page = with_timeout(
            ErrorKind::DirectoryUnavailable,
            call_timeout,
            "directory search",
            fetch(next.take()),
        )
        .await?;
        requests += 1;

        let page_len = page.items.len();
        items.extend(page.items);
        debug!(requests, page_len, total = items.len(), "Fetched directory page");

        if limits.is_short_page(page_len) {
            break;
        }
        match page.next {
            Some(link) => next = Some(link),
            None => break,
        }
    }

    items.truncate(limits.result_cap);
    Ok(items)
}
