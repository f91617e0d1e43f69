//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`LinkDescriptor`] - Editor-authored description of where a link points
//! - [`ResolvedLink`] - Concrete `href`, target and confirmation policy
//! - [`RedirectRecord`] - Raw redirect rule as stored in the content source
//! - [`RedirectEntry`] - Short-code redirect materialized in the cache
//! - [`RouteRewrite`] - Static path rewrite rule for the build-time route table

pub mod link_descriptor;
pub mod redirect;
pub mod resolved_link;

pub use link_descriptor::{DocumentType, ExternalLink, InternalLink, LinkDescriptor};
pub use redirect::{RedirectEntry, RedirectRecord, RouteRewrite};
pub use resolved_link::{ConfirmationPolicy, LinkTarget, ResolvedLink};
