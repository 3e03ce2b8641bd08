//! Application startup and server initialization.
//!
//! This module wires the page store, session store, credentials and views into
//! the shared state, builds the router and serves it until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ConfigV1;
use crate::routes;
use crate::session::MemorySessionStore;
use crate::state::AppState;
use crate::store::create_store;
use crate::views::Views;

/// Builds the shared state from configuration.
///
/// # Errors
///
/// Fails when the admin credentials are missing, the pages directory cannot be
/// created or a template does not compile.
pub async fn build_state(config: Arc<ConfigV1>) -> Result<AppState, Box<dyn Error>> {
    let credentials = Arc::new(config.credentials()?);
    let store = create_store(&config.pages_dir).await?;
    let sessions = Arc::new(MemorySessionStore::new(config.session.idle_timeout()));
    let views = Arc::new(Views::new()?);

    Ok(AppState {
        config,
        credentials,
        store,
        sessions,
        views,
    })
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the state cannot be built, the server fails to bind to
/// the configured address or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn Error>> {
    let state = build_state(config.clone()).await?;
    let app = routes::create_router(state);

    info!("Serving pages from {}", config.pages_dir.display());
    info!("Starting server on {}", config.bind_address);

    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
