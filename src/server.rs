//! HTTP server initialization and runtime setup.
//!
//! Handles content source selection, redirect cache setup, cache warm-up,
//! and the Axum server lifecycle.

use crate::application::services::{RedirectCache, ShortLinkPattern};
use crate::config::Config;
use crate::infrastructure::content::source_from_config;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redirect source (content API, JSON file, or empty)
/// - Short-link redirect cache, warmed in the background
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The content API client cannot be built
/// - The short-link route or parameter does not form a valid pattern
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let source = source_from_config(&config).context("Failed to set up redirect source")?;

    let pattern = ShortLinkPattern::new(&config.short_link_route, &config.short_link_param)
        .context("Invalid short-link route or parameter")?;

    let cache = Arc::new(
        RedirectCache::new(source.clone(), pattern)
            .with_ttl(Duration::from_secs(config.redirect_cache_ttl_seconds))
            .with_fetch_timeout(Duration::from_secs(config.content_fetch_timeout_seconds)),
    );

    let warm = cache.clone();
    tokio::spawn(async move {
        if warm.refresh().await.is_ok() {
            tracing::info!("Redirect cache warmed");
        }
    });

    let state = AppState::new(source, cache, config.behind_proxy);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
