//! Server service.

use std::sync::Arc;

use tracing::info;

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::traits::ActiveServerStore;
use rustops_core::types::{ActiveServer, ServerSummary};

use crate::directory::DirectorySearch;

/// Finds servers and manages the server every check runs against.
#[derive(Debug, Clone)]
pub struct ServerService {
    /// Directory search.
    search: Arc<DirectorySearch>,
    /// Active server persistence.
    store: Arc<dyn ActiveServerStore>,
}

impl ServerService {
    /// Creates a new server service.
    pub fn new(search: Arc<DirectorySearch>, store: Arc<dyn ActiveServerStore>) -> Self {
        Self { search, store }
    }

    /// Search servers by name.
    pub async fn find_servers(&self, query: &str) -> AppResult<Vec<ServerSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_identifier("A server name is required"));
        }
        self.search.search_by_name(query).await
    }

    /// The active server, if one is set.
    pub async fn active_server(&self) -> AppResult<Option<ActiveServer>> {
        self.store.get().await
    }

    /// The active server, or a configuration error if none is set.
    pub async fn require_active_server(&self) -> AppResult<ActiveServer> {
        self.store.get().await?.ok_or_else(|| {
            AppError::configuration("no server set (use `rustops server set <name>`)")
        })
    }

    /// Replace the active server.
    pub async fn set_active_server(&self, server_id: &str, server_name: &str) -> AppResult<ActiveServer> {
        let server = self.store.set(server_id.trim(), server_name.trim()).await?;
        info!(server_id = %server.server_id, server_name = %server.server_name, "Active server set");
        Ok(server)
    }

    /// Clear the active server. Returns `true` if one was set.
    pub async fn clear_active_server(&self) -> AppResult<bool> {
        self.store.clear().await
    }
}
