//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::application::services::CacheState;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Redirect cache healthy or not yet populated
/// - **503 Service Unavailable**: Last refresh of the redirect cache failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "redirect_cache": {
///       "status": "ok",
///       "message": "fresh, 42 short codes from content API at https://..."
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_redirect_cache(&state).await;

    let all_healthy = cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            redirect_cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Reports the redirect cache; only a failed last refresh counts as an error.
async fn check_redirect_cache(state: &AppState) -> CheckStatus {
    let status = state.redirect_cache.status().await;

    let state_name = match status.state {
        CacheState::Empty => "empty",
        CacheState::Populating => "populating",
        CacheState::Fresh => "fresh",
        CacheState::Stale => "stale",
    };

    match status.last_error {
        None => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "{}, {} short codes from {}",
                state_name, status.entries, status.source
            )),
        },
        Some(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!(
                "{}, serving {} cached short codes: {}",
                state_name, status.entries, e
            )),
        },
    }
}
