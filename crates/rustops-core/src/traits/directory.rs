//! Directory service trait for server/player metadata and session history.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::directory::{Candidate, ServerSummary, SessionRecord};
use crate::types::pagination::DirectoryPage;
use crate::types::sorting::PlayerSort;

/// The external system of record for servers, players, and sessions.
///
/// Every method distinguishes a transport failure (`Err`, usually
/// `DirectoryUnavailable`) from a legitimate empty result (`Ok` with no
/// items). Paginated methods take the `next` link of the previous page,
/// or `None` for the first page.
#[async_trait]
pub trait DirectoryService: Send + Sync + std::fmt::Debug + 'static {
    /// Search servers by name.
    async fn search_servers(
        &self,
        query: &str,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<ServerSummary>>;

    /// Search players by name, restricted to a server.
    async fn search_players(
        &self,
        name: &str,
        server_id: &str,
        sort: PlayerSort,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<Candidate>>;

    /// Fetch a single player by directory ID. Returns `None` if unknown.
    async fn get_player(&self, player_id: &str) -> AppResult<Option<Candidate>>;

    /// Fetch the sessions of a player on a server, newest first.
    async fn get_sessions(&self, player_id: &str, server_id: &str)
    -> AppResult<Vec<SessionRecord>>;
}
