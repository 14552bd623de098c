use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::error::RelayError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
///
/// The body is always a JSON object with an `error` message; `kind` and `code`
/// are added when the error came from a [`RelayError`].
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    kind: Option<&'static str>,
    code: Option<u16>,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            kind: None,
            code: None,
        }
    }
}

impl From<RelayError> for HTTPError {
    fn from(err: RelayError) -> Self {
        HTTPError {
            status: err.status(),
            message: err.to_string(),
            kind: Some(err.kind()),
            code: err.upstream_code(),
        }
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::from(self.message));
        if let Some(kind) = self.kind {
            body.insert("kind".to_string(), Value::from(kind));
        }
        if let Some(code) = self.code {
            body.insert("code".to_string(), json!(code));
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}
