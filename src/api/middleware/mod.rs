//! HTTP middleware for request processing and protection.
//!
//! Provides the short-link filter, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod short_link;
pub mod tracing;
