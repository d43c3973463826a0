//! Recency value object.

use serde::{Deserialize, Serialize};

/// The largest whole unit of an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    /// Under a day; labelled in hours and minutes.
    Hours,
    /// At least one day.
    Days,
    /// At least seven days.
    Weeks,
    /// At least thirty days.
    Months,
    /// At least 365 days.
    Years,
}

impl BucketKind {
    /// Whether an identity last updated this long ago is too old to be a
    /// disambiguation candidate.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Months | Self::Years)
    }

    /// Return the bucket as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl std::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human label for an elapsed duration plus its machine-readable bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recency {
    /// Human label, e.g. `"3h 12m ago"` or `"2 weeks ago"`.
    pub label: String,
    /// Bucket the elapsed duration fell into.
    pub bucket: BucketKind,
    /// Elapsed whole seconds (never negative).
    pub elapsed_seconds: i64,
}

impl Recency {
    /// Create a recency value.
    pub fn new(label: impl Into<String>, bucket: BucketKind, elapsed_seconds: i64) -> Self {
        Self {
            label: label.into(),
            bucket,
            elapsed_seconds,
        }
    }
}

impl std::fmt::Display for Recency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
