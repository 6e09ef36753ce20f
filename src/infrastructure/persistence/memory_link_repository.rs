//! In-memory implementation of the link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{LinkPatch, NewLink, TemporaryLink};
use crate::domain::repositories::{LinkDecision, LinkRepository, LinkUpdate};
use crate::error::AppError;
use crate::utils::code_generator::{RandomCodeGenerator, ShortIdGenerator};

/// Attempts at finding an unused identifier before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Process-lifetime link storage backed by a sharded [`DashMap`].
///
/// Every mutation holds the write guard of the key's shard for its whole
/// read-modify-write, which makes per-key updates linearizable while links on
/// other shards proceed in parallel. Nothing awaits while a guard is held.
pub struct MemoryLinkRepository {
    links: DashMap<String, TemporaryLink>,
    next_id: AtomicI64,
    generator: Arc<dyn ShortIdGenerator>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository with the default random generator.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(RandomCodeGenerator::default()))
    }

    /// Creates an empty repository using `generator` for short identifiers.
    pub fn with_generator(generator: Arc<dyn ShortIdGenerator>) -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
            generator,
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<TemporaryLink, AppError> {
        for _ in 0..MAX_ATTEMPTS {
            let short_id = self.generator.generate();

            match self.links.entry(short_id) {
                Entry::Occupied(occupied) => {
                    tracing::warn!(short_id = %occupied.key(), "Short id collision, retrying");
                }
                Entry::Vacant(vacant) => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let link = TemporaryLink::new(id, vacant.key().clone(), new_link);
                    vacant.insert(link.clone());
                    return Ok(link);
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short id",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<TemporaryLink>, AppError> {
        Ok(self.links.get(short_id).map(|entry| entry.value().clone()))
    }

    async fn update(
        &self,
        short_id: &str,
        patch: LinkPatch,
    ) -> Result<Option<TemporaryLink>, AppError> {
        let Some(mut entry) = self.links.get_mut(short_id) else {
            return Ok(None);
        };

        entry.value_mut().apply(&patch);

        Ok(Some(entry.value().clone()))
    }

    async fn update_with(
        &self,
        short_id: &str,
        decide: LinkDecision,
    ) -> Result<Option<LinkUpdate>, AppError> {
        let Some(mut entry) = self.links.get_mut(short_id) else {
            return Ok(None);
        };

        // `decide` runs under the shard guard and must not touch the map.
        let before = entry.value().clone();
        if let Some(patch) = decide(&before) {
            entry.value_mut().apply(&patch);
        }
        let after = entry.value().clone();

        Ok(Some(LinkUpdate { before, after }))
    }

    async fn list_all(&self) -> Result<Vec<TemporaryLink>, AppError> {
        let mut links: Vec<TemporaryLink> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by_key(|link| link.id);
        Ok(links)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.links.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ExpirationMode;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Replays a fixed list of identifiers, repeating the last one forever.
    struct ScriptedGenerator {
        codes: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(codes: &[&str]) -> Self {
            let mut codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
            codes.reverse();
            Self {
                codes: Mutex::new(codes),
            }
        }
    }

    impl ShortIdGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            let mut codes = self.codes.lock().unwrap();
            if codes.len() > 1 {
                codes.pop().unwrap()
            } else {
                codes[0].clone()
            }
        }
    }

    fn new_link() -> NewLink {
        NewLink {
            destination_url: "https://example.com".to_string(),
            expiration_mode: ExpirationMode::OneHour,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let repo = MemoryLinkRepository::with_generator(Arc::new(ScriptedGenerator::new(&[
            "aaaaaaaaaaaa",
            "aaaaaaaaaaaa",
            "bbbbbbbbbbbb",
        ])));

        let first = repo.create(new_link()).await.unwrap();
        let second = repo.create(new_link()).await.unwrap();

        assert_eq!(first.short_id, "aaaaaaaaaaaa");
        assert_eq!(second.short_id, "bbbbbbbbbbbb");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_fails_after_max_attempts() {
        let repo = MemoryLinkRepository::with_generator(Arc::new(ScriptedGenerator::new(&[
            "samesamesame",
        ])));

        repo.create(new_link()).await.unwrap();
        let err = repo.create(new_link()).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = MemoryLinkRepository::new();

        let a = repo.create(new_link()).await.unwrap();
        let b = repo.create(new_link()).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_update_with_skips_decision_for_unknown_id() {
        let repo = MemoryLinkRepository::new();

        let result = repo
            .update_with(
                "missing",
                Box::new(|_: &TemporaryLink| -> Option<LinkPatch> {
                    panic!("decision must not run for unknown ids")
                }),
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
