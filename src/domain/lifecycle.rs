//! Expiration policy and the visit transition.
//!
//! Everything here is pure: functions take a record and the current time and
//! return a decision. Persisting that decision is the job of
//! [`crate::application::services::LinkService`], which runs these functions
//! inside [`LinkRepository::update_with`](crate::domain::repositories::LinkRepository::update_with)
//! so the read, the decision and the write happen under one per-key lock.
//!
//! # State machine
//!
//! ```text
//! Active ──(time passed | clicks reached | removed)──▶ Expired
//! ```
//!
//! `Expired` is terminal.

use chrono::{DateTime, Utc};

use crate::domain::entities::{LinkPatch, TemporaryLink};

/// Result of [`evaluate_expiration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationCheck {
    /// Whether the link must be treated as expired at the evaluated instant.
    pub is_expired: bool,
    /// `true` only when the stored flag is still `false` but the link is now
    /// expired; the caller must persist the flip.
    pub changed: bool,
}

/// Outcome of following a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Send the visitor to this destination.
    Redirect(String),
    /// The link exists but can no longer be used.
    Expired,
    /// No link has this identifier.
    NotFound,
}

/// Decides whether `link` is expired at `now`, without persisting anything.
///
/// A link is expired when its flag is already set, when `now` has reached
/// `expires_at`, or when `click_count` has reached `max_clicks`.
pub fn evaluate_expiration(link: &TemporaryLink, now: DateTime<Utc>) -> ExpirationCheck {
    if link.is_expired {
        return ExpirationCheck {
            is_expired: true,
            changed: false,
        };
    }

    let time_passed = link.expires_at.is_some_and(|expires_at| now >= expires_at);
    let clicks_used = link
        .max_clicks
        .is_some_and(|max_clicks| link.click_count >= max_clicks);

    let is_expired = time_passed || clicks_used;

    ExpirationCheck {
        is_expired,
        changed: is_expired,
    }
}

/// Patch persisting a newly detected expiry, if any.
pub fn refresh_patch(link: &TemporaryLink, now: DateTime<Utc>) -> Option<LinkPatch> {
    evaluate_expiration(link, now)
        .changed
        .then(LinkPatch::expire)
}

/// Patch produced by visiting `link` at `now`.
///
/// An expired link only gets its flag flipped (if not already stored); its
/// counter is left alone. An active link gets `click_count + 1` and is flipped
/// to expired when that reaches `max_clicks`.
pub fn visit_patch(link: &TemporaryLink, now: DateTime<Utc>) -> Option<LinkPatch> {
    let check = evaluate_expiration(link, now);

    if check.is_expired {
        return check.changed.then(LinkPatch::expire);
    }

    let click_count = link.click_count + 1;
    let is_expired = link
        .max_clicks
        .is_some_and(|max_clicks| click_count >= max_clicks);

    Some(LinkPatch {
        click_count: Some(click_count),
        is_expired: Some(is_expired),
    })
}

/// Outcome of a visit, decided from the record as it was before the visit.
pub fn visit_outcome(before: &TemporaryLink, now: DateTime<Utc>) -> VisitOutcome {
    if evaluate_expiration(before, now).is_expired {
        VisitOutcome::Expired
    } else {
        VisitOutcome::Redirect(before.destination_url.clone())
    }
}
