//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the two upstream clients, and metrics.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::upstream::{RouteForwarder, TokenProvider};

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler; everything inside is
/// reference counted, so the token cache is shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Token service client and its cache.
    pub tokens: Arc<TokenProvider>,
    /// Routing provider client.
    pub routes: Arc<RouteForwarder>,
    /// Prometheus metrics for upstream calls.
    pub metrics: Metrics,
}

impl AppState {
    /// Builds the upstream clients described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the metrics registry cannot be created.
    pub fn from_config(config: Arc<ConfigV1>) -> Result<Self, Box<dyn std::error::Error>> {
        let metrics = Metrics::new()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let tokens = Arc::new(TokenProvider::new(
            &config.token_service,
            client.clone(),
            metrics.clone(),
        ));
        let routes = Arc::new(RouteForwarder::new(&config.routing, client, metrics.clone()));

        Ok(AppState {
            config,
            tokens,
            routes,
            metrics,
        })
    }
}
