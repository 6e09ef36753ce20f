//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and the domain policy, and
//! give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Creation, visits, status and removal of temporary links

pub mod services;
