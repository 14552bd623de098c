//! Error kinds surfaced by the relay.
//!
//! Every failure maps to one variant. Handlers never recover from these; the
//! variant decides the HTTP status and the JSON body returned to the caller.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The token service answered 200 without a usable `token` field.
    #[error("Token not found")]
    TokenMissing,

    /// The token service answered with a non-200 status.
    #[error("Failed to fetch token")]
    UpstreamStatus(u16),

    /// The token service could not be reached or its body could not be read.
    #[error("Request failed")]
    RequestFailed(String),

    /// The routing provider answered with a 4xx/5xx status.
    #[error("HTTP error occurred while requesting route")]
    RouteProviderStatus(u16),

    /// Any other failure while talking to the routing provider.
    #[error("An error occurred while requesting route")]
    RouteRequestFailed(String),

    /// A successful route response without a usable
    /// `result.trip.routes[0].travelTimeMinutes` (missing, negative, or too large
    /// to place on the timeline).
    #[error("Route response did not contain a travel time")]
    MalformedRoute,

    #[error("Missing latitude or longitude parameters")]
    MissingParameters,

    #[error("Invalid latitude or longitude parameters")]
    InvalidParameters,
}

impl RelayError {
    /// Snake-case tag included in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::TokenMissing => "token_missing",
            RelayError::UpstreamStatus(_) => "upstream_status",
            RelayError::RequestFailed(_) => "request_failed",
            RelayError::RouteProviderStatus(_) => "route_provider_error",
            RelayError::RouteRequestFailed(_) => "route_request_failed",
            RelayError::MalformedRoute => "malformed_route",
            RelayError::MissingParameters => "missing_parameters",
            RelayError::InvalidParameters => "invalid_parameters",
        }
    }

    /// The upstream status code, for variants that mirror one.
    pub fn upstream_code(&self) -> Option<u16> {
        match self {
            RelayError::UpstreamStatus(code) | RelayError::RouteProviderStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// Status returned to our caller: the upstream status where known, else 500 or 400.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UpstreamStatus(code) | RelayError::RouteProviderStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::MissingParameters | RelayError::InvalidParameters => StatusCode::BAD_REQUEST,
            RelayError::TokenMissing
            | RelayError::RequestFailed(_)
            | RelayError::RouteRequestFailed(_)
            | RelayError::MalformedRoute => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_statuses_are_mirrored() {
        assert_eq!(
            RelayError::RouteProviderStatus(503).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(RelayError::UpstreamStatus(403).status(), StatusCode::FORBIDDEN);
        assert_eq!(RelayError::UpstreamStatus(403).upstream_code(), Some(403));
    }

    #[test]
    fn local_failures_map_to_500_or_400() {
        assert_eq!(
            RelayError::TokenMissing.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::RouteRequestFailed("timeout".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::MissingParameters.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::MissingParameters.upstream_code(), None);
    }

    #[test]
    fn out_of_range_status_falls_back_to_bad_gateway() {
        assert_eq!(
            RelayError::RouteProviderStatus(1000).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
