//! Application startup and server initialization.
//!
//! This module handles the creation of the upstream clients, the shared
//! state and the HTTP server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// Builds the token provider and route forwarder from the configuration,
/// binds to `bind_address` and serves requests until the process stops.
///
/// # Errors
///
/// Returns an error if the upstream clients cannot be built, the server fails
/// to bind to the specified address or encounters a runtime error.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(config.clone())?;
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        "Starting server on {}, forwarding to '{}'",
        config.bind_address, config.routing.base_url
    );

    axum::serve(listener, app).await?;

    Ok(())
}
