//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /t/{short_id}` - Follow a temporary link
//! - `GET  /health`       - Health check
//! - `/api/links*`        - Link management
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and tracing, without rate limiting.
///
/// Rate limiting needs the peer address from `ConnectInfo`, which in-process
/// test servers do not provide.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/t/{short_id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the served application: [`router`] plus rate limiting and
/// trailing slash normalization.
///
/// When `config.behind_proxy` is set, the client IP is read from forwarding
/// headers instead of the peer socket address.
///
/// # Errors
///
/// Returns an error if the rate limit settings are zero.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let per_second = config.rate_limit_per_second;
    let burst = config.rate_limit_burst;

    let router = if config.behind_proxy {
        router(state).layer(rate_limit::proxy_layer(per_second, burst)?)
    } else {
        router(state).layer(rate_limit::layer(per_second, burst)?)
    };

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
