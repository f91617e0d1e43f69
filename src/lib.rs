//! # Site Links
//!
//! Link resolution and legacy short-link redirects for a CMS-backed website,
//! built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link descriptors, redirect records, and the redirect source trait
//! - **Application Layer** ([`application`]) - Link resolver, navigation guard, redirect cache, route table
//! - **Infrastructure Layer** ([`infrastructure`]) - Content API client, file source, clocks
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware (short-link filter, rate limiting)
//!
//! ## Features
//!
//! - Uniform `{ href, target, confirmationPolicy }` for internal, external and one-off links
//! - Layered leave-site / email / third-party confirmation on link activation
//! - `GET /go.php?bid=N` answered from a TTL cache of CMS redirect rules
//! - Build-time rewrite table for every other CMS redirect rule
//!
//! ## Quick Start
//!
//! ```bash
//! # Point at the CMS query endpoint (or set REDIRECTS_FILE)
//! export CONTENT_API_URL="https://cms.example/v1/query/production"
//! export CONTENT_API_TOKEN="..."  # Optional
//!
//! # Start the service
//! cargo run
//!
//! # Resolve a descriptor from the command line
//! echo '{"internal":{"documentType":"post","slug":"hello"}}' | cargo run --bin linkctl -- resolve -
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        NavigationGuard, RedirectCache, RouteTable, ShortLinkPattern, resolve,
    };
    pub use crate::domain::entities::{
        ConfirmationPolicy, LinkDescriptor, LinkTarget, RedirectRecord, ResolvedLink,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
