//! Application layer services implementing link and redirect logic.
//!
//! # Available Services
//!
//! - [`services::link_resolver`] - Pure descriptor-to-link resolution
//! - [`services::navigation_guard`] - Confirmation policy applied on link activation
//! - [`services::redirect_cache`] - TTL cache of short-code redirects
//! - [`services::route_table`] - Short-code matching and static rewrite rules

pub mod services;
