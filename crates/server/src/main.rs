//! Symposia API server binary
//!
//! The entry point for the conference website backend.
//! Handles:
//! - Store and blob backend selection from configuration
//! - Schema bootstrap and initial data seeding
//! - Observability (logging, metrics, request ids)

use std::net::SocketAddr;
use std::sync::Arc;
use symposia_common::{
    config::AppConfig,
    storage::create_blob_store,
    store::create_store,
};
use symposia_server::{create_router, install_metrics, AppState};
use tokio::signal;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .json()
        .init();

    info!("Starting Symposia API server v{}", symposia_common::VERSION);

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;

    let config = Arc::new(config);

    // Initialize metrics
    let metrics = install_metrics();

    // Initialize the record store and the blob store
    info!(backend = %config.store.backend, "Connecting record store...");
    let store = create_store(&config).await?;
    let blobs = create_blob_store(&config.blob);

    // Create app state
    let state = AppState {
        config: config.clone(),
        store,
        blobs,
        metrics,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
