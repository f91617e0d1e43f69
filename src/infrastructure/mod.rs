//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`clock`] - System and manually driven clocks
//! - [`content`] - Redirect sources backed by the CMS query API or a JSON file

pub mod clock;
pub mod content;
