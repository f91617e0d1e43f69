//! Redirect entities sourced from the content store.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// A redirect rule exactly as stored in the content source.
///
/// `source` may be a plain path (`/old-page`), a path with a query string
/// (`/old-page?ref=x`) or a legacy short code (`/go.php?bid=42`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub source: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub destination: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub permanent: bool,
}

impl RedirectRecord {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, permanent: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            permanent,
        }
    }
}

/// A short-code redirect held by the redirect cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectEntry {
    pub code: String,
    /// Absolute or root-relative URL.
    pub destination: String,
    pub permanent: bool,
}

/// A static rewrite rule served by the router, not by the short-link filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRewrite {
    pub source: String,
    pub destination: String,
    pub permanent: bool,
}
