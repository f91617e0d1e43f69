#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

use site_links::application::services::{RedirectCache, ShortLinkPattern};
use site_links::domain::entities::RedirectRecord;
use site_links::domain::repositories::RedirectSource;
use site_links::infrastructure::content::StaticRedirectSource;
use site_links::state::AppState;

pub fn default_pattern() -> ShortLinkPattern {
    ShortLinkPattern::new("/go.php", "bid").unwrap()
}

/// Redirect rules as they come out of the CMS: two short codes, one
/// relative short-code destination, and ordinary page moves.
pub fn sample_records() -> Vec<RedirectRecord> {
    vec![
        RedirectRecord::new("/go.php?bid=42", "https://partner.example/offer", true),
        RedirectRecord::new("/go.php?bid=7", "https://partner.example/spring", false),
        RedirectRecord::new("/go.php?bid=9", "/news/summer-campaign?ref=short", true),
        RedirectRecord::new("/old-news", "/news", true),
        RedirectRecord::new("/promo?utm_source=mail", "/offers", false),
    ]
}

pub fn create_state_with_source(source: Arc<dyn RedirectSource>) -> AppState {
    let cache = Arc::new(RedirectCache::new(source.clone(), default_pattern()));
    AppState::new(source, cache, false)
}

pub fn create_test_state(records: Vec<RedirectRecord>) -> AppState {
    create_state_with_source(Arc::new(StaticRedirectSource::from_records(records)))
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));
        self.inner.call(req)
    }
}
