//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::clock::Clock;
use crate::infrastructure::persistence::MemoryLinkRepository;

/// Link service over the in-memory store.
pub type AppLinkService = LinkService<MemoryLinkRepository>;

/// State shared by every request handler.
///
/// The store lives inside `link_service`; there is no global instance.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    /// Public base URL used to build short links, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires a service around `repository` and `clock`.
    pub fn new(
        repository: Arc<MemoryLinkRepository>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();

        Self {
            link_service: Arc::new(LinkService::new(repository, clock)),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public short URL for `short_id`.
    pub fn short_url(&self, short_id: &str) -> String {
        self.link_service.get_short_url(&self.base_url, short_id)
    }
}
