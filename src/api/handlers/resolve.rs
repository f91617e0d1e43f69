//! Handler for link resolution.

use axum::{Json, body::Bytes};
use tracing::debug;

use crate::api::dto::resolve::ResolveResponse;
use crate::application::services::resolve;
use crate::domain::entities::LinkDescriptor;

/// Resolves a link descriptor to its `href`, target and confirmation policy.
///
/// # Endpoint
///
/// `POST /api/links/resolve`
///
/// # Request Body
///
/// ```json
/// {
///   "externalLink": { "url": "https://x.com", "newTab": true, "leaveAlert": true }
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "href": "https://x.com",
///   "target": "_blank",
///   "confirmationPolicy": "leavingSiteWarning",
///   "rel": "noopener noreferrer"
/// }
/// ```
///
/// A missing or malformed body resolves like an empty descriptor (`/`,
/// same tab, no confirmation) instead of failing.
pub async fn resolve_handler(body: Bytes) -> Json<ResolveResponse> {
    let descriptor = if body.iter().all(u8::is_ascii_whitespace) {
        LinkDescriptor::default()
    } else {
        serde_json::from_slice::<LinkDescriptor>(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Malformed link descriptor, using default");
            LinkDescriptor::default()
        })
    };

    Json(resolve(&descriptor).into())
}
