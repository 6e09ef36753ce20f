//! Handlers for link management endpoints (create, status, list, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkListResponse, LinkResponse, LinkSummary};
use crate::domain::entities::ExpirationMode;
use crate::domain::lifecycle::evaluate_expiration;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a temporary link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "destinationUrl": "https://example.com", "expirationMode": "1-hour" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with per-field messages if validation fails.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.destination_url = payload.destination_url.trim().to_string();
    payload.validate()?;

    let expiration_mode: ExpirationMode = payload.expiration_mode.parse().map_err(|e| {
        AppError::bad_request(
            "Invalid input",
            json!({ "fields": { "expirationMode": [format!("{e}")] } }),
        )
    })?;

    let link = state
        .link_service
        .create_link(&payload.destination_url, expiration_mode)
        .await?;

    let short_url = state.short_url(&link.short_id);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Returns a link's current state.
///
/// # Endpoint
///
/// `GET /api/links/{short_id}`
///
/// Expiration is re-evaluated first; a link that has timed out since its last
/// visit is persisted as expired before being returned. Removed and spent links
/// are still returned (with `isExpired: true`).
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is unknown.
pub async fn link_status_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.link_status(&short_id).await?;

    let short_url = state.short_url(&link.short_id);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Lists every stored link.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// `isExpired` and the summary reflect the current time; nothing is persisted.
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let now = state.link_service.now();
    let links = state.link_service.list_links().await?;

    let items: Vec<LinkResponse> = links
        .into_iter()
        .map(|mut link| {
            link.is_expired = evaluate_expiration(&link, now).is_expired;
            let short_url = state.short_url(&link.short_id);
            LinkResponse::new(link, short_url)
        })
        .collect();

    let expired = items.iter().filter(|item| item.is_expired).count();

    Ok(Json(LinkListResponse {
        summary: LinkSummary {
            total: items.len(),
            active: items.len() - expired,
            expired,
        },
        items,
    }))
}

/// Soft-deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{short_id}`
///
/// # Behavior
///
/// - The record is **not** removed; it is marked expired.
/// - Subsequent visits return **410 Gone**, status queries report `isExpired: true`.
/// - Deleting an already deleted link succeeds again.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is unknown.
pub async fn delete_link_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !state.link_service.remove(&short_id).await? {
        return Err(AppError::not_found(
            "Link not found",
            json!({ "short_id": short_id }),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
