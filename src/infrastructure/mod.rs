//! Infrastructure layer.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Storage implementations of the repository traits

pub mod persistence;
