//! DTOs for redirect cache and route table endpoints.

use serde::Serialize;

use crate::application::services::CacheStatus;
use crate::domain::entities::RouteRewrite;

/// Static rewrite rules derived from the content source.
#[derive(Debug, Serialize)]
pub struct RouteTableResponse {
    pub count: usize,
    pub rules: Vec<RouteRewrite>,
}

/// Result of a forced cache refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cache: CacheStatus,
}
