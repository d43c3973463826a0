//! Raw player identifier classification.

use std::sync::LazyLock;

use regex::Regex;

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_entity::identity::{Identifier, IdentifierKind};

/// Host of the supported identity provider's community profiles.
const PROFILE_HOST: &str = "steamcommunity.com";

static PROFILE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?steamcommunity\.com/(?:profiles/\d{17}|id/[^/?#\s]+)/*$")
        .expect("profile url regex is valid")
});

/// Classify a raw identifier. Performs no network calls.
///
/// Digits only is a [`IdentifierKind::NumericId`], a community profile URL
/// is a [`IdentifierKind::ProfileUrl`], anything else is free text. Empty
/// input and URLs that are not profile URLs are rejected.
pub fn classify(raw: &str) -> AppResult<Identifier> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::invalid_identifier("A player identifier is required"));
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Identifier::new(IdentifierKind::NumericId, value));
    }

    if PROFILE_URL_REGEX.is_match(value) {
        return Ok(Identifier::new(IdentifierKind::ProfileUrl, value));
    }

    if looks_like_url(value) {
        return Err(AppError::invalid_identifier(format!(
            "Unsupported URL '{value}': expected {PROFILE_HOST}/profiles/<id> or {PROFILE_HOST}/id/<name>"
        )));
    }

    Ok(Identifier::new(IdentifierKind::FreeText, value))
}

fn looks_like_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("://")
        || lower.starts_with(PROFILE_HOST)
        || lower.starts_with(&format!("www.{PROFILE_HOST}"))
}
