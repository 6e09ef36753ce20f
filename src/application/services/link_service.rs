//! Temporary link lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::clock::Clock;
use crate::domain::entities::{ExpirationMode, LinkPatch, NewLink, TemporaryLink};
use crate::domain::lifecycle::{self, VisitOutcome};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_destination_url;

/// Service owning the lifecycle of temporary links.
///
/// All expiration checks and click accounting go through here so that callers
/// cannot evaluate or persist them inconsistently. Each state change is a
/// single [`LinkRepository::update_with`] call, so concurrent visits to the
/// same link are serialized by the repository.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            link_repository,
            clock,
        }
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Creates a temporary link.
    ///
    /// The destination is trimmed and validated; `created_at` comes from the
    /// clock and the expiry limits from `expiration_mode`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the destination is not an absolute
    /// HTTP(S) URL.
    /// Returns [`AppError::Internal`] if no unused short id could be allocated.
    pub async fn create_link(
        &self,
        destination_url: &str,
        expiration_mode: ExpirationMode,
    ) -> Result<TemporaryLink, AppError> {
        let destination_url = validate_destination_url(destination_url).map_err(|e| {
            AppError::bad_request(
                "Invalid input",
                json!({ "fields": { "destinationUrl": [e.to_string()] } }),
            )
        })?;

        let link = self
            .link_repository
            .create(NewLink {
                destination_url,
                expiration_mode,
                created_at: self.clock.now(),
            })
            .await?;

        metrics::counter!("temp_links_created_total", "mode" => expiration_mode.as_str())
            .increment(1);
        tracing::info!(
            short_id = %link.short_id,
            mode = %expiration_mode,
            expires_at = ?link.expires_at,
            "Temporary link created"
        );

        Ok(link)
    }

    /// Looks a link up without evaluating or persisting expiration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn get_link(&self, short_id: &str) -> Result<TemporaryLink, AppError> {
        self.link_repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| not_found(short_id))
    }

    /// Returns the link with its expired flag brought up to date.
    ///
    /// If the link has crossed its time or click threshold since it was last
    /// touched, the flip is persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn link_status(&self, short_id: &str) -> Result<TemporaryLink, AppError> {
        self.link_status_at(short_id, self.clock.now()).await
    }

    /// [`Self::link_status`] evaluated at an explicit instant.
    pub async fn link_status_at(
        &self,
        short_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TemporaryLink, AppError> {
        let update = self
            .link_repository
            .update_with(
                short_id,
                Box::new(move |link: &TemporaryLink| lifecycle::refresh_patch(link, now)),
            )
            .await?
            .ok_or_else(|| not_found(short_id))?;

        if !update.before.is_expired && update.after.is_expired {
            tracing::info!(short_id, "Link expired");
        }

        Ok(update.after)
    }

    /// Follows a link: counts the click or refuses an expired link.
    pub async fn visit(&self, short_id: &str) -> Result<VisitOutcome, AppError> {
        self.visit_at(short_id, self.clock.now()).await
    }

    /// [`Self::visit`] evaluated at an explicit instant.
    ///
    /// 1. Unknown identifier → [`VisitOutcome::NotFound`]
    /// 2. Expired (or expiring now) → flag persisted, [`VisitOutcome::Expired`],
    ///    click count untouched
    /// 3. Otherwise → click counted, flag set if that was the last allowed
    ///    click, [`VisitOutcome::Redirect`]
    ///
    /// Steps 2 and 3 run inside one atomic repository update.
    pub async fn visit_at(
        &self,
        short_id: &str,
        now: DateTime<Utc>,
    ) -> Result<VisitOutcome, AppError> {
        let update = self
            .link_repository
            .update_with(
                short_id,
                Box::new(move |link: &TemporaryLink| lifecycle::visit_patch(link, now)),
            )
            .await?;

        let outcome = match update {
            None => VisitOutcome::NotFound,
            Some(update) => lifecycle::visit_outcome(&update.before, now),
        };

        let label = match &outcome {
            VisitOutcome::Redirect(_) => "redirect",
            VisitOutcome::Expired => "expired",
            VisitOutcome::NotFound => "not_found",
        };
        metrics::counter!("temp_links_visits_total", "outcome" => label).increment(1);
        tracing::debug!(short_id, outcome = label, "Link visited");

        Ok(outcome)
    }

    /// Soft-deletes a link by forcing it to expired.
    ///
    /// The record stays queryable and reports expired. Returns `false` for an
    /// unknown identifier; nothing is created in that case.
    pub async fn remove(&self, short_id: &str) -> Result<bool, AppError> {
        let removed = self
            .link_repository
            .update(short_id, LinkPatch::expire())
            .await?
            .is_some();

        if removed {
            metrics::counter!("temp_links_removed_total").increment(1);
            tracing::info!(short_id, "Link removed");
        }

        Ok(removed)
    }

    /// Snapshot of all links, as stored. Used by ops tooling.
    pub async fn list_links(&self) -> Result<Vec<TemporaryLink>, AppError> {
        self.link_repository.list_all().await
    }

    /// Number of stored links.
    pub async fn count_links(&self) -> Result<usize, AppError> {
        self.link_repository.count().await
    }

    /// Constructs the public URL that visits a link.
    pub fn get_short_url(&self, base_url: &str, short_id: &str) -> String {
        format!("{}/t/{}", base_url.trim_end_matches('/'), short_id)
    }
}

fn not_found(short_id: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "short_id": short_id }))
}
