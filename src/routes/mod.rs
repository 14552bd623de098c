//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! route forwarding, schedules, token cache control, metrics, and health checks.

mod health_routes;
mod metrics_routes;
mod route_routes;
mod schedule_routes;
mod token_routes;

use crate::error::RelayError;
use crate::state::AppState;
use axum::Router;
use tracing::warn;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(route_routes::routes())
        .merge(schedule_routes::routes())
        .merge(token_routes::routes())
        .merge(metrics_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}

/// Drops the cached token after the routing provider rejected it, when configured to.
/// The failing request is not retried.
fn forget_rejected_token(state: &AppState, err: &RelayError) {
    if state.config.token_service.invalidate_on_unauthorized
        && *err == RelayError::RouteProviderStatus(401)
    {
        warn!("Routing provider rejected the cached token; invalidating it");
        state.tokens.invalidate();
    }
}
