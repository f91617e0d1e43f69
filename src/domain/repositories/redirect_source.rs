//! Repository trait for redirect rules stored in the content source.

use crate::domain::entities::RedirectRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching content.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout after {0}s")]
    Timeout(u64),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ContentError {
    /// Returns true if the error is transient and should be retried.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Decode(_) | Self::Io(_) => false,
        }
    }
}

/// Source of redirect rules.
///
/// The cache treats a fetch as opaque: every call returns the complete list
/// in the order the store provides it.
///
/// # Implementations
///
/// - [`crate::infrastructure::content::HttpRedirectSource`] - CMS query API
/// - [`crate::infrastructure::content::StaticRedirectSource`] - JSON file or fixed list
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectSource: Send + Sync {
    /// Fetches all redirect records.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when the store is unreachable or returns
    /// data that cannot be decoded.
    async fn fetch_redirects(&self) -> Result<Vec<RedirectRecord>, ContentError>;

    /// Short human-readable description used in logs and status output.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_retry() {
        assert!(ContentError::Transport("reset".into()).should_retry());
        assert!(ContentError::Timeout(10).should_retry());
        assert!(ContentError::Http { status: 503, body: String::new() }.should_retry());
        assert!(ContentError::Http { status: 429, body: String::new() }.should_retry());
        assert!(!ContentError::Http { status: 404, body: String::new() }.should_retry());
        assert!(!ContentError::Decode("eof".into()).should_retry());
    }
}
