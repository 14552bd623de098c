#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use routerelay::config::{extract_config, ConfigV1};
use routerelay::routes::create_router;
use routerelay::state::AppState;
use serde_json::Value;

/// Config pointing both upstreams at the given mock server.
pub fn load_test_config(upstream_url: &str, invalidate_on_unauthorized: bool) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:0
logging:
  level: "debug"
  format: "json"
token_service:
  url: {upstream_url}/gettoken
  timeout_in_ms: 2000
  ttl_in_seconds: 3600
  invalidate_on_unauthorized: {invalidate_on_unauthorized}
routing:
  base_url: {upstream_url}
  timeout_in_ms: 2000
schedule:
  dwell_minutes: 60
  waypoints:
    - {{ lat: 37.7749, lng: -122.4194 }}
    - {{ lat: 37.3382, lng: -121.8863 }}
    - {{ lat: 37.8044, lng: -122.2711 }}
demo_route:
  from: {{ lat: 37.770581, lng: -122.44255 }}
  to: {{ lat: 37.765297, lng: -122.442527 }}
"#
    );

    extract_config(&Figment::new().merge(Yaml::string(&yaml)))
        .expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    let state = AppState::from_config(Arc::new(config)).expect("state should build");
    create_router(state)
}

pub fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn route_body(travel_time_minutes: u64) -> Value {
    serde_json::json!({
        "result": {"trip": {"routes": [{"travelTimeMinutes": travel_time_minutes}]}}
    })
}
