//! Identifier value object.

use serde::{Deserialize, Serialize};

/// Length of a 64-bit platform account ID in decimal digits.
pub const PLATFORM_ID_LEN: usize = 17;

/// Common prefix of every individual 64-bit platform account ID.
pub const PLATFORM_ID_PREFIX: &str = "7656119";

/// How a raw player identifier was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Pure digits: a directory ID or a platform account ID.
    NumericId,
    /// A profile URL on the identity provider.
    ProfileUrl,
    /// Anything else, treated as a display name.
    FreeText,
}

impl IdentifierKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NumericId => "numeric_id",
            Self::ProfileUrl => "profile_url",
            Self::FreeText => "free_text",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified, trimmed player identifier. Created per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    kind: IdentifierKind,
    raw_value: String,
}

impl Identifier {
    /// Create an identifier of a known kind.
    pub fn new(kind: IdentifierKind, raw_value: impl Into<String>) -> Self {
        Self {
            kind,
            raw_value: raw_value.into(),
        }
    }

    /// The classified kind.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The trimmed raw input.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// Whether this numeric identifier is a 64-bit platform account ID
    /// rather than a directory ID.
    pub fn is_platform_id(&self) -> bool {
        self.kind == IdentifierKind::NumericId
            && self.raw_value.len() == PLATFORM_ID_LEN
            && self.raw_value.starts_with(PLATFORM_ID_PREFIX)
    }
}
