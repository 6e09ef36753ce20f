//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, link_status_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`             - List links with an active/expired summary
/// - `POST   /links`             - Create a temporary link
/// - `GET    /links/{short_id}`  - Link status (re-evaluates expiration)
/// - `DELETE /links/{short_id}`  - Soft-delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{short_id}",
            get(link_status_handler).delete(delete_link_handler),
        )
}
