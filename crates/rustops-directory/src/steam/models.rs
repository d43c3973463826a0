//! Steam Web API response envelopes.

use serde::Deserialize;

/// `{ "response": ... }` envelope used by every ISteamUser method.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

/// ResolveVanityURL response. `success == 1` means `steamid` is set.
#[derive(Debug, Deserialize)]
pub struct VanityResponse {
    pub success: i32,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// GetPlayerSummaries response.
#[derive(Debug, Deserialize)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

/// A single player summary.
#[derive(Debug, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    pub personaname: String,
}
