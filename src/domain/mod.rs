//! Domain layer containing link and redirect value types.
//!
//! Nothing in this layer performs I/O. Types here are shared between the
//! resolver, the redirect cache, the HTTP surface and the CLI.
//!
//! # Architecture
//!
//! - [`entities`] - Link descriptors, resolved links, redirect records
//! - [`repositories`] - The [`repositories::RedirectSource`] contract implemented
//!   by the infrastructure layer
//! - [`clock`] - Injectable wall clock
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic lives in [`crate::application::services`]

pub mod clock;
pub mod entities;
pub mod repositories;
