//! Token cache endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use crate::models::Token;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers token routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/token", get(get_token).delete(invalidate_token))
}

/// Returns the current token and when it was fetched, fetching one if needed.
async fn get_token(State(state): State<AppState>) -> Result<Json<Token>, HTTPError> {
    Ok(Json(state.tokens.get_token().await?))
}

/// Drops the cached token; the next request fetches a fresh one.
async fn invalidate_token(State(state): State<AppState>) -> StatusCode {
    state.tokens.invalidate();
    StatusCode::NO_CONTENT
}
