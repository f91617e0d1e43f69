//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data access
//! - Implementations live in `crate::infrastructure::content`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RedirectSource`] - Redirect rules held by the content store

pub mod redirect_source;

pub use redirect_source::{ContentError, RedirectSource};

#[cfg(test)]
pub use redirect_source::MockRedirectSource;
