//! Business logic services for the application layer.

pub mod link_resolver;
pub mod navigation_guard;
pub mod redirect_cache;
pub mod route_table;

pub use link_resolver::resolve;
pub use navigation_guard::{ConfirmPrompt, Disclaimer, DisclaimerTexts, NavigationGuard};
pub use redirect_cache::{CacheState, CacheStatus, RedirectCache};
pub use route_table::{RouteTable, ShortLinkPattern};
