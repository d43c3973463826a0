//! JSON:API documents returned by BattleMetrics.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use rustops_core::types::{Candidate, ServerSummary, SessionRecord};

/// A list document: `{ "data": [...], "links": { "next": ... } }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct ListDocument<A> {
    /// Resources on this page.
    #[serde(default)]
    pub data: Vec<Resource<A>>,
    /// Pagination links.
    #[serde(default)]
    pub links: Option<Links>,
}

impl<A> ListDocument<A> {
    /// The link to the next page, if any.
    pub fn next_link(&self) -> Option<String> {
        self.links.as_ref().and_then(|l| l.next.clone())
    }
}

/// A single-resource document: `{ "data": {...} }`.
#[derive(Debug, Deserialize)]
pub struct SingleDocument<A> {
    /// The resource.
    pub data: Resource<A>,
}

/// A JSON:API resource object.
#[derive(Debug, Deserialize)]
pub struct Resource<A> {
    /// Resource ID.
    pub id: String,
    /// Resource attributes.
    pub attributes: A,
}

/// Pagination links.
#[derive(Debug, Default, Deserialize)]
pub struct Links {
    /// Absolute URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Attributes of a server resource.
#[derive(Debug, Deserialize)]
pub struct ServerAttributes {
    pub name: String,
}

/// Attributes of a player resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a session resource.
#[derive(Debug, Deserialize)]
pub struct SessionAttributes {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub stop: Option<DateTime<Utc>>,
}

impl From<Resource<ServerAttributes>> for ServerSummary {
    fn from(resource: Resource<ServerAttributes>) -> Self {
        ServerSummary::new(resource.id, resource.attributes.name)
    }
}

impl From<Resource<PlayerAttributes>> for Candidate {
    fn from(resource: Resource<PlayerAttributes>) -> Self {
        Candidate::new(
            resource.id,
            resource.attributes.name,
            resource.attributes.updated_at,
        )
    }
}

impl From<Resource<SessionAttributes>> for SessionRecord {
    fn from(resource: Resource<SessionAttributes>) -> Self {
        SessionRecord {
            start: resource.attributes.start,
            stop: resource.attributes.stop,
        }
    }
}
