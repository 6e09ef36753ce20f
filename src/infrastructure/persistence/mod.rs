//! Repository implementations.
//!
//! # Repositories
//!
//! - [`MemoryLinkRepository`] - Process-lifetime link storage with per-key locking

pub mod memory_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
