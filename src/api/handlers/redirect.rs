//! Handler for following a temporary link.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::domain::lifecycle::VisitOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Visits a temporary link.
///
/// # Endpoint
///
/// `GET /t/{short_id}`
///
/// Counts the click and returns 307 Temporary Redirect to the destination. A
/// single-click link is consumed by the first successful visit.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is unknown.
/// Returns 410 Gone if the link has expired or was deleted.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    match state.link_service.visit(&short_id).await? {
        VisitOutcome::Redirect(destination) => Ok(Redirect::temporary(&destination)),
        VisitOutcome::Expired => Err(AppError::expired(
            "This link has expired",
            json!({ "short_id": short_id }),
        )),
        VisitOutcome::NotFound => Err(AppError::not_found(
            "Link not found",
            json!({ "short_id": short_id }),
        )),
    }
}
