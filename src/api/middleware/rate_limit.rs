//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Requests replenished per second, per client IP.
const PER_SECOND: u64 = 2;
/// Burst allowance, per client IP.
const BURST_SIZE: u32 = 100;

/// Applies the per-IP rate limiter to `router`.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false` - socket peer address (requires `ConnectInfo`)
/// - `behind_proxy = true` - `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
///   falling back to the peer address
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api::routes::routes(), config.behind_proxy);
/// ```
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(GovernorLayer::new(config(SmartIpKeyExtractor)))
    } else {
        router.layer(GovernorLayer::new(config(PeerIpKeyExtractor)))
    }
}

fn config<K: KeyExtractor>(extractor: K) -> Arc<GovernorConfig<K, NoOpMiddleware>> {
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limiter period and burst size are non-zero"),
    )
}
