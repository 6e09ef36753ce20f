//! DTOs for temporary link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::{ExpirationMode, TemporaryLink};

/// Request body for `POST /api/links`.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// field-level validation errors instead of a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination to redirect to (trimmed before validation).
    #[serde(rename = "destinationUrl", default)]
    #[validate(
        length(min = 1, message = "Please enter a URL to shorten"),
        url(message = "Please enter a valid URL")
    )]
    pub destination_url: String,

    /// One of `1-click`, `1-hour`, `24-hours` (or `single-click`, `one-hour`, `one-day`).
    #[serde(rename = "expirationMode", default)]
    #[validate(custom(function = "validate_expiration_mode"))]
    pub expiration_mode: String,
}

fn validate_expiration_mode(mode: &str) -> Result<(), ValidationError> {
    if mode.parse::<ExpirationMode>().is_ok() {
        return Ok(());
    }

    let mut error = ValidationError::new("expiration_mode");
    error.message = Some(Cow::Borrowed(
        "Expiration mode must be one of '1-click', '1-hour', '24-hours'",
    ));
    Err(error)
}

/// JSON representation of a temporary link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub short_id: String,
    pub short_url: String,
    pub destination_url: String,
    pub expiration_mode: ExpirationMode,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<u64>,
    pub click_count: u64,
    pub is_expired: bool,
}

impl LinkResponse {
    pub fn new(link: TemporaryLink, short_url: String) -> Self {
        Self {
            id: link.id,
            short_id: link.short_id,
            short_url,
            destination_url: link.destination_url,
            expiration_mode: link.expiration_mode,
            created_at: link.created_at,
            expires_at: link.expires_at,
            max_clicks: link.max_clicks,
            click_count: link.click_count,
            is_expired: link.is_expired,
        }
    }
}

/// Response of `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub summary: LinkSummary,
    pub items: Vec<LinkResponse>,
}

/// Counts of links by effective state.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}
