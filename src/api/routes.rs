//! API route configuration.

use crate::api::handlers::{
    redirect_status_handler, refresh_redirects_handler, resolve_handler, route_table_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /links/resolve`     - Resolve a link descriptor
/// - `GET  /routes`            - Static route table from the content source
/// - `GET  /redirects`         - Short-link cache status
/// - `POST /redirects/refresh` - Force a short-link cache refresh
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links/resolve", post(resolve_handler))
        .route("/routes", get(route_table_handler))
        .route("/redirects", get(redirect_status_handler))
        .route("/redirects/refresh", post(refresh_redirects_handler))
}
