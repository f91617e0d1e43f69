//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod redirects;
pub mod resolve;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use redirects::{redirect_status_handler, refresh_redirects_handler, route_table_handler};
pub use resolve::resolve_handler;
