//! Redirect sources.
//!
//! Provides two [`RedirectSource`] implementations:
//! - [`HttpRedirectSource`] - Production source querying the CMS API
//! - [`StaticRedirectSource`] - JSON file or in-memory list

mod http_source;
mod static_source;

pub use http_source::{DEFAULT_REDIRECTS_QUERY, HttpRedirectSource};
pub use static_source::StaticRedirectSource;

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::repositories::{ContentError, RedirectSource};

/// Picks the redirect source described by the configuration.
///
/// Priority:
/// 1. `CONTENT_API_URL` - CMS query API
/// 2. `REDIRECTS_FILE` - local JSON export
/// 3. Nothing configured - empty source, short links never match
///
/// # Errors
///
/// Returns [`ContentError::Transport`] if the API client cannot be built.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn RedirectSource>, ContentError> {
    if let Some(url) = &config.content_api_url {
        let mut source = HttpRedirectSource::new(
            url,
            config.content_api_token.clone(),
            Duration::from_secs(config.content_fetch_timeout_seconds),
        )?;
        if let Some(query) = &config.content_query {
            source = source.with_query(query.clone());
        }
        info!("Redirect source: {}", source.describe());
        return Ok(Arc::new(source));
    }

    if let Some(path) = &config.redirects_file {
        let source = StaticRedirectSource::from_file(path);
        info!("Redirect source: {}", source.describe());
        return Ok(Arc::new(source));
    }

    warn!("No CONTENT_API_URL or REDIRECTS_FILE configured, short links are disabled");
    Ok(Arc::new(StaticRedirectSource::empty()))
}
