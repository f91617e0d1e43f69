//! Handlers for the redirect cache and route table.

use axum::{Json, extract::State};

use crate::api::dto::redirects::{RefreshResponse, RouteTableResponse};
use crate::application::services::{CacheStatus, RouteTable};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short-link cache status.
///
/// # Endpoint
///
/// `GET /api/redirects`
pub async fn redirect_status_handler(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.redirect_cache.status().await)
}

/// Forces a short-link cache refresh.
///
/// # Endpoint
///
/// `POST /api/redirects/refresh`
///
/// Always answers 200: a failed refresh is reported in the body and the
/// cache keeps serving its previous entries.
pub async fn refresh_redirects_handler(State(state): State<AppState>) -> Json<RefreshResponse> {
    let result = state.redirect_cache.refresh().await;

    Json(RefreshResponse {
        refreshed: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
        cache: state.redirect_cache.status().await,
    })
}

/// Returns the static route table built from the content source.
///
/// # Endpoint
///
/// `GET /api/routes`
///
/// Short-code rules are excluded (the short-link filter answers those) and
/// query strings are stripped from all other sources.
///
/// # Errors
///
/// Returns 502 Bad Gateway if the content source cannot be read.
pub async fn route_table_handler(
    State(state): State<AppState>,
) -> Result<Json<RouteTableResponse>, AppError> {
    let records = state.redirect_source.fetch_redirects().await?;
    let table = RouteTable::build(&records, state.redirect_cache.pattern());

    Ok(Json(RouteTableResponse {
        count: table.len(),
        rules: table.into_rules(),
    }))
}
