//! Legacy short-link filter.
//!
//! Runs ahead of normal routing. Requests for the short-link route carrying
//! a code that the redirect cache knows are answered with a redirect; every
//! other request continues untouched.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, Uri, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};
use url::Url;

use crate::state::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Intercepts `GET`/`HEAD <route>?<param>=<code>`.
///
/// # Responses
///
/// - **308 Permanent Redirect** for permanent entries
/// - **307 Temporary Redirect** otherwise
/// - pass-through for other methods, when the parameter is missing, the code
///   is unknown, or the destination cannot be sent as a `Location` header
///
/// Root-relative destinations are resolved against the request's own origin
/// before being emitted.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .fallback(not_found_handler)
///     .layer(middleware::from_fn_with_state(state.clone(), short_link::layer))
///     .with_state(state);
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let pattern = state.redirect_cache.pattern();

    let method = req.method();
    if req.uri().path() != pattern.route() || (*method != Method::GET && *method != Method::HEAD) {
        return next.run(req).await;
    }

    let Some(code) = query_param(req.uri(), pattern.param()) else {
        metrics::counter!("short_link_requests_total", "outcome" => "missing_code").increment(1);
        return next.run(req).await;
    };

    let Some(entry) = state.redirect_cache.lookup(&code).await else {
        metrics::counter!("short_link_requests_total", "outcome" => "miss").increment(1);
        debug!(code, "Unknown short code, passing through");
        return next.run(req).await;
    };

    let location = absolute_destination(
        &entry.destination,
        req.uri(),
        req.headers(),
        state.trust_forwarded_headers,
    );

    if HeaderValue::from_str(&location).is_err() {
        metrics::counter!("short_link_requests_total", "outcome" => "invalid_destination")
            .increment(1);
        warn!(
            code,
            destination = %entry.destination,
            "Short link destination is not a valid Location, passing through"
        );
        return next.run(req).await;
    }

    metrics::counter!("short_link_requests_total", "outcome" => "hit").increment(1);
    debug!(code, %location, permanent = entry.permanent, "Short link redirect");

    if entry.permanent {
        Redirect::permanent(&location).into_response()
    } else {
        Redirect::temporary(&location).into_response()
    }
}

/// First non-empty value of `name` in the query string.
fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == name && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

/// Resolves `destination` against the request origin when it is relative.
///
/// Destinations are emitted in serialized URL form: control characters are
/// dropped and non-ASCII is percent-encoded. If the origin cannot be
/// determined a relative destination is returned as stored.
fn absolute_destination(
    destination: &str,
    uri: &Uri,
    headers: &HeaderMap,
    trust_forwarded: bool,
) -> String {
    if let Ok(url) = Url::parse(destination) {
        return url.into();
    }

    request_origin(uri, headers, trust_forwarded)
        .and_then(|origin| origin.join(destination).ok())
        .map(String::from)
        .unwrap_or_else(|| destination.to_string())
}

fn request_origin(uri: &Uri, headers: &HeaderMap, trust_forwarded: bool) -> Option<Url> {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let forwarded = |name: &str| if trust_forwarded { header_str(name) } else { None };

    let host = forwarded(X_FORWARDED_HOST)
        .or_else(|| header_str(header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str()))?;

    let scheme = forwarded(X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");

    Url::parse(&format!("{scheme}://{host}/")).ok()
}
