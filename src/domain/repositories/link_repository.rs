//! Repository trait for temporary link storage.

use crate::domain::entities::{LinkPatch, NewLink, TemporaryLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Decision run against the current record while its key is locked.
///
/// Returning `None` leaves the record untouched.
pub type LinkDecision = Box<dyn FnOnce(&TemporaryLink) -> Option<LinkPatch> + Send>;

/// Record before and after an atomic update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUpdate {
    pub before: TemporaryLink,
    pub after: TemporaryLink,
}

/// Repository interface for temporary links.
///
/// Owns short identifier allocation and is the only place records are
/// mutated. Implementations must make every mutation of a single key
/// linearizable: two concurrent [`update_with`](Self::update_with) calls on the
/// same identifier never observe the same pre-update state.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - sharded in-memory map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link under a freshly generated short identifier.
    ///
    /// The expiry limits are derived from `new_link.expiration_mode`; the
    /// record starts with zero clicks and not expired. Inputs are expected to
    /// be validated already.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no unused identifier could be generated.
    async fn create(&self, new_link: NewLink) -> Result<TemporaryLink, AppError>;

    /// Finds a link by its short identifier. No side effects.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<TemporaryLink>, AppError>;

    /// Merges `patch` into the stored record and returns the updated copy.
    ///
    /// Returns `Ok(None)` without creating anything if the identifier is unknown.
    async fn update(
        &self,
        short_id: &str,
        patch: LinkPatch,
    ) -> Result<Option<TemporaryLink>, AppError>;

    /// Atomically reads the record, asks `decide` for a patch and merges it.
    ///
    /// Returns `Ok(None)` if the identifier is unknown; `decide` is not called
    /// in that case.
    async fn update_with(
        &self,
        short_id: &str,
        decide: LinkDecision,
    ) -> Result<Option<LinkUpdate>, AppError>;

    /// Snapshot of every stored link, ordered by `id`.
    async fn list_all(&self) -> Result<Vec<TemporaryLink>, AppError>;

    /// Number of stored links.
    async fn count(&self) -> Result<usize, AppError>;
}
