//! HTTP server initialization and runtime setup.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::infrastructure::persistence::MemoryLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// The link store is created empty and lives as long as the server; it is
/// dropped on shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - `listen_addr` cannot be parsed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let generator = Arc::new(RandomCodeGenerator::new(config.short_id_length));
    let repository = Arc::new(MemoryLinkRepository::with_generator(generator));
    tracing::info!("In-memory link store initialized");

    let state = AppState::new(repository, Arc::new(SystemClock), config.base_url.clone());

    let app = app_router(state, &config)?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
