//! Multi-stop schedule endpoint.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;

use super::forget_rejected_token;
use crate::models::Leg;
use crate::schedule::build_schedule;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers the schedule route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/schedule", get(schedule))
}

/// `GET /schedule`: legs between the configured waypoints, departing now.
///
/// Either every leg is returned or the error of the first failing leg.
async fn schedule(State(state): State<AppState>) -> Result<Json<Vec<Leg>>, HTTPError> {
    let token = state.tokens.get_token().await?;
    let config = &state.config.schedule;

    let schedule = build_schedule(
        &state.routes,
        &token,
        &config.waypoints,
        config.dwell_minutes,
        Utc::now(),
    )
    .await
    .map_err(|e| {
        forget_rejected_token(&state, &e);
        HTTPError::from(e)
    })?;

    Ok(Json(schedule.legs))
}
