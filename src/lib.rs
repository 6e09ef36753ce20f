//! # Temp Links
//!
//! Short-lived redirect links built with Axum. Each link expires after one
//! click, one hour, or one day, whichever its mode says; expired links are
//! kept and answer `410 Gone`.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link entity, expiration rules, clock and repository trait
//! - **Application Layer** ([`application`]) - Link lifecycle orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Concurrent in-memory store
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="https://tmp.example.com"
//! cargo run
//!
//! curl -X POST localhost:3000/api/links \
//!   -H 'content-type: application/json' \
//!   -d '{"destinationUrl":"https://example.com","expirationMode":"1-click"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{ExpirationMode, LinkPatch, NewLink, TemporaryLink};
    pub use crate::domain::lifecycle::VisitOutcome;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryLinkRepository;
    pub use crate::state::AppState;
}
