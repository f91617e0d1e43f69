use std::sync::Arc;

use crate::application::services::RedirectCache;
use crate::domain::repositories::RedirectSource;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub redirect_cache: Arc<RedirectCache>,
    pub redirect_source: Arc<dyn RedirectSource>,
    /// Whether `X-Forwarded-Proto` / `X-Forwarded-Host` may be used to rebuild
    /// the request origin.
    pub trust_forwarded_headers: bool,
}

impl AppState {
    pub fn new(
        redirect_source: Arc<dyn RedirectSource>,
        redirect_cache: Arc<RedirectCache>,
        trust_forwarded_headers: bool,
    ) -> Self {
        Self {
            redirect_cache,
            redirect_source,
            trust_forwarded_headers,
        }
    }
}
