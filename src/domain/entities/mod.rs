//! Core domain entities.
//!
//! Entities are plain data structures; the expiration policy that drives them
//! lives in [`crate::domain::lifecycle`].
//!
//! # Entity Types
//!
//! - [`TemporaryLink`] - A short-lived redirect link
//! - [`NewLink`] - Input for creating a link
//! - [`LinkPatch`] - Partial update of the mutable fields

pub mod link;

pub use link::{
    ExpirationLimits, ExpirationMode, LinkPatch, NewLink, TemporaryLink, UnknownExpirationMode,
};
