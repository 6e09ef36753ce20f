//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Temporary link storage with atomic per-key updates

pub mod link_repository;

pub use link_repository::{LinkDecision, LinkRepository, LinkUpdate};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
