//! BattleMetrics implementation of [`DirectoryService`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use rustops_core::config::DirectoryConfig;
use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;
use rustops_core::traits::DirectoryService;
use rustops_core::types::{
    Candidate, DirectoryPage, PlayerSort, ServerSummary, SessionRecord,
};

use super::models::{
    ListDocument, PlayerAttributes, ServerAttributes, SessionAttributes, SingleDocument,
};
use crate::http::{build_client, join_url};

/// Directory client backed by the BattleMetrics API.
#[derive(Debug, Clone)]
pub struct BattleMetricsClient {
    /// HTTP client with the configured timeout.
    client: reqwest::Client,
    /// API base URL.
    base_url: String,
    /// Bearer token.
    token: String,
    /// Items requested per page.
    page_size: usize,
}

impl BattleMetricsClient {
    /// Create a client from configuration. Fails if no token is configured.
    pub fn new(config: &DirectoryConfig) -> AppResult<Self> {
        if config.token.trim().is_empty() {
            return Err(AppError::configuration(
                "directory.token is required (set RUSTOPS__DIRECTORY__TOKEN)",
            ));
        }

        Ok(Self {
            client: build_client(config.request_timeout_seconds)?,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            page_size: config.page_size.max(1),
        })
    }

    /// Build the URL of a first page, or reuse the provider's next link.
    fn page_url(&self, path: &str, params: &[(&str, String)], page: Option<&str>) -> AppResult<reqwest::Url> {
        let raw = match page {
            Some(next) => return parse_url(next),
            None => join_url(&self.base_url, path),
        };
        reqwest::Url::parse_with_params(&raw, params).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, format!("Invalid directory URL: {raw}"), e)
        })
    }

    /// Issue an authenticated GET. Returns `None` on 404.
    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> AppResult<Option<T>> {
        debug!(url = %url, "Directory request");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::DirectoryUnavailable,
                    format!("Directory request failed: {}", url.path()),
                    e,
                )
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::directory_unavailable(format!(
                "Directory returned HTTP {} for {}",
                status.as_u16(),
                url.path()
            )));
        }

        let body = response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DirectoryUnavailable,
                format!("Malformed directory response for {}", url.path()),
                e,
            )
        })?;
        Ok(Some(body))
    }

    /// Fetch a list document, treating 404 as an error.
    async fn get_list<A: DeserializeOwned>(&self, url: reqwest::Url) -> AppResult<ListDocument<A>> {
        let path = url.path().to_string();
        self.get_json::<ListDocument<A>>(url)
            .await?
            .ok_or_else(|| AppError::directory_unavailable(format!("Directory endpoint not found: {path}")))
    }
}

fn parse_url(raw: &str) -> AppResult<reqwest::Url> {
    reqwest::Url::parse(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::DirectoryUnavailable,
            format!("Directory returned an invalid next link: {raw}"),
            e,
        )
    })
}

#[async_trait]
impl DirectoryService for BattleMetricsClient {
    async fn search_servers(
        &self,
        query: &str,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<ServerSummary>> {
        let url = self.page_url(
            "servers",
            &[
                ("filter[search]", query.to_string()),
                ("page[size]", self.page_size.to_string()),
            ],
            page,
        )?;

        let doc = self.get_list::<ServerAttributes>(url).await?;
        let next = doc.next_link();
        let items = doc.data.into_iter().map(ServerSummary::from).collect();
        Ok(DirectoryPage::new(items, next))
    }

    async fn search_players(
        &self,
        name: &str,
        server_id: &str,
        sort: PlayerSort,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<Candidate>> {
        let url = self.page_url(
            "players",
            &[
                ("filter[search]", name.to_string()),
                ("filter[servers]", server_id.to_string()),
                ("sort", sort.as_param().to_string()),
                ("page[size]", self.page_size.to_string()),
            ],
            page,
        )?;

        let doc = self.get_list::<PlayerAttributes>(url).await?;
        let next = doc.next_link();
        let items = doc.data.into_iter().map(Candidate::from).collect();
        Ok(DirectoryPage::new(items, next))
    }

    async fn get_player(&self, player_id: &str) -> AppResult<Option<Candidate>> {
        let url = self.page_url(&format!("players/{player_id}"), &[], None)?;
        let doc = self
            .get_json::<SingleDocument<PlayerAttributes>>(url)
            .await?;
        Ok(doc.map(|d| Candidate::from(d.data)))
    }

    async fn get_sessions(
        &self,
        player_id: &str,
        server_id: &str,
    ) -> AppResult<Vec<SessionRecord>> {
        let url = self.page_url(
            &format!("players/{player_id}/relationships/sessions"),
            &[("filter[servers]", server_id.to_string())],
            None,
        )?;

        let doc = self.get_list::<SessionAttributes>(url).await?;
        let mut sessions: Vec<SessionRecord> =
            doc.data.into_iter().map(SessionRecord::from).collect();
        sessions.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(sessions)
    }
}
