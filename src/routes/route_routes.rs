//! Single-leg route endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::forget_rejected_token;
use crate::error::RelayError;
use crate::models::Coordinate;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers the route forwarding endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/route", get(demo_route))
        .route("/quickpath", get(quickpath))
}

/// Query parameters of `GET /quickpath`. All four are required.
#[derive(Deserialize, Debug, Default)]
struct QuickpathParams {
    start_lat: Option<String>,
    start_lng: Option<String>,
    end_lat: Option<String>,
    end_lng: Option<String>,
}

impl QuickpathParams {
    /// Validates presence first, then that every value is a number.
    fn coordinates(&self) -> Result<(Coordinate, Coordinate), RelayError> {
        let (Some(start_lat), Some(start_lng), Some(end_lat), Some(end_lng)) = (
            present(&self.start_lat),
            present(&self.start_lng),
            present(&self.end_lat),
            present(&self.end_lng),
        ) else {
            return Err(RelayError::MissingParameters);
        };

        let start = Coordinate::parse(start_lat, start_lng).ok_or(RelayError::InvalidParameters)?;
        let end = Coordinate::parse(end_lat, end_lng).ok_or(RelayError::InvalidParameters)?;
        Ok((start, end))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Obtains a token and forwards one leg, mapping every failure to an `HTTPError`.
async fn forward(
    state: &AppState,
    start: &Coordinate,
    end: &Coordinate,
) -> Result<Json<Value>, HTTPError> {
    let token = state.tokens.get_token().await?;
    match state.routes.get_route(start, end, &token).await {
        Ok(route) => Ok(Json(route)),
        Err(e) => {
            forget_rejected_token(state, &e);
            Err(e.into())
        }
    }
}

/// `GET /route`: the configured demo pair.
async fn demo_route(State(state): State<AppState>) -> Result<Json<Value>, HTTPError> {
    let demo = &state.config.demo_route;
    debug!("Serving demo route {} -> {}", demo.from, demo.to);
    forward(&state, &demo.from, &demo.to).await
}

/// `GET /quickpath`: a caller-supplied pair.
///
/// Parameters are checked before any upstream is contacted. A query string
/// that does not deserialize (e.g. a repeated key) is reported as invalid.
async fn quickpath(
    State(state): State<AppState>,
    params: Result<Query<QuickpathParams>, QueryRejection>,
) -> Result<Json<Value>, HTTPError> {
    let Query(params) = params.map_err(|rejection| {
        debug!("Rejected quickpath query: {}", rejection.body_text());
        RelayError::InvalidParameters
    })?;
    let (start, end) = params.coordinates()?;
    forward(&state, &start, &end).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: [Option<&str>; 4]) -> QuickpathParams {
        let [start_lat, start_lng, end_lat, end_lng] = values.map(|v| v.map(str::to_string));
        QuickpathParams {
            start_lat,
            start_lng,
            end_lat,
            end_lng,
        }
    }

    #[test]
    fn all_parameters_are_required() {
        let missing = params([Some("37.7"), None, Some("37.3"), Some("-121.8")]);
        assert_eq!(missing.coordinates(), Err(RelayError::MissingParameters));

        let empty = params([Some("37.7"), Some(""), Some("37.3"), Some("-121.8")]);
        assert_eq!(empty.coordinates(), Err(RelayError::MissingParameters));
    }

    #[test]
    fn non_numeric_values_are_invalid() {
        let invalid = params([Some("37.7"), Some("west"), Some("37.3"), Some("-121.8")]);
        assert_eq!(invalid.coordinates(), Err(RelayError::InvalidParameters));
    }

    #[test]
    fn parses_both_waypoints() {
        let valid = params([
            Some("37.7749"),
            Some("-122.4194"),
            Some("37.3382"),
            Some("-121.8863"),
        ]);
        assert_eq!(
            valid.coordinates(),
            Ok((
                Coordinate::new(37.7749, -122.4194),
                Coordinate::new(37.3382, -121.8863)
            ))
        );
    }
}
