//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`lifecycle`] - Pure expiration policy and the visit transition
//! - [`clock`] - Injectable time source
//!
//! # Visit Flow
//!
//! 1. HTTP handler receives `GET /t/{short_id}`
//! 2. [`crate::application::services::LinkService::visit`] reads the clock
//! 3. The repository locks the key and runs [`lifecycle::visit_patch`]
//! 4. The outcome is derived from the pre-visit record via [`lifecycle::visit_outcome`]

pub mod clock;
pub mod entities;
pub mod lifecycle;
pub mod repositories;
