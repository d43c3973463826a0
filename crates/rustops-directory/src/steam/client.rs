//! Steam implementation of [`IdentityProvider`].

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use rustops_core::config::IdentityConfig;
use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;
use rustops_core::traits::IdentityProvider;
use rustops_core::types::PlatformProfile;

use super::models::{Envelope, PlayerSummaries, VanityResponse};
use crate::http::{build_client, join_url};

/// `/profiles/<SteamID64>` or `/id/<vanity>` on the community host.
static PROFILE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?steamcommunity\.com/(profiles|id)/([^/?#]+)/*$")
        .expect("profile url regex is valid")
});

/// A bare 17-digit SteamID64.
static STEAM_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{17}$").expect("steam id regex is valid"));

/// What a profile reference points at before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ProfileRef {
    /// A SteamID64.
    SteamId(String),
    /// A vanity name that must be resolved first.
    Vanity(String),
}

fn parse_profile_ref(url_or_id: &str) -> AppResult<ProfileRef> {
    let input = url_or_id.trim();
    if STEAM_ID_REGEX.is_match(input) {
        return Ok(ProfileRef::SteamId(input.to_string()));
    }

    let caps = PROFILE_URL_REGEX
        .captures(input)
        .ok_or_else(|| AppError::invalid_identifier(format!("Not a Steam profile: {input}")))?;

    let value = caps[2].to_string();
    match &caps[1] {
        "profiles" if STEAM_ID_REGEX.is_match(&value) => Ok(ProfileRef::SteamId(value)),
        "profiles" => Err(AppError::invalid_identifier(format!(
            "Profile URL does not contain a SteamID64: {input}"
        ))),
        _ => Ok(ProfileRef::Vanity(value)),
    }
}

/// Identity provider backed by the Steam Web API.
#[derive(Debug, Clone)]
pub struct SteamClient {
    /// HTTP client with the configured timeout.
    client: reqwest::Client,
    /// API base URL.
    base_url: String,
    /// Web API key.
    api_key: String,
}

impl SteamClient {
    /// Create a client from configuration. Fails if no API key is configured.
    pub fn new(config: &IdentityConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "identity.api_key is required (set RUSTOPS__IDENTITY__API_KEY)",
            ));
        }

        Ok(Self {
            client: build_client(config.request_timeout_seconds)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method_path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let raw = join_url(&self.base_url, method_path);
        let mut query: Vec<(&str, &str)> = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);
        let url = reqwest::Url::parse_with_params(&raw, &query).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, format!("Invalid identity URL: {raw}"), e)
        })?;

        debug!(method = method_path, "Identity provider request");

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::IdentityUnavailable,
                format!("Identity provider request failed: {method_path}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::identity_unavailable(format!(
                "Identity provider returned HTTP {} for {method_path}",
                status.as_u16()
            )));
        }

        let envelope = response.json::<Envelope<T>>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::IdentityUnavailable,
                format!("Malformed identity provider response for {method_path}"),
                e,
            )
        })?;
        Ok(envelope.response)
    }

    async fn resolve_vanity(&self, vanity: &str) -> AppResult<String> {
        let resp: VanityResponse = self
            .call("ISteamUser/ResolveVanityURL/v0001/", &[("vanityurl", vanity)])
            .await?;

        match (resp.success, resp.steamid) {
            (1, Some(id)) => Ok(id),
            _ => Err(AppError::not_found(format!(
                "No Steam profile for vanity name '{vanity}'{}",
                resp.message.map(|m| format!(": {m}")).unwrap_or_default()
            ))),
        }
    }
}

#[async_trait]
impl IdentityProvider for SteamClient {
    async fn resolve_profile(&self, url_or_id: &str) -> AppResult<PlatformProfile> {
        let steam_id = match parse_profile_ref(url_or_id)? {
            ProfileRef::SteamId(id) => id,
            ProfileRef::Vanity(vanity) => self.resolve_vanity(&vanity).await?,
        };

        let summaries: PlayerSummaries = self
            .call("ISteamUser/GetPlayerSummaries/v0002/", &[("steamids", steam_id.as_str())])
            .await?;

        summaries
            .players
            .into_iter()
            .find(|p| p.steamid == steam_id)
            .map(|p| PlatformProfile {
                platform_id: p.steamid,
                display_name: p.personaname,
            })
            .ok_or_else(|| AppError::not_found(format!("No Steam profile for {steam_id}")))
    }
}
