use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Coordinate;

/// Where and how the bearer token is obtained.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct TokenServiceConfig {
    #[serde(default = "default_token_url")]
    pub url: String,
    #[serde(default = "default_token_timeout")]
    pub timeout_in_ms: u64,
    /// How long a fetched token is reused before the endpoint is asked again.
    #[serde(default = "default_token_ttl")]
    pub ttl_in_seconds: u64,
    /// Drop the cached token when the routing provider answers 401.
    #[serde(default)]
    pub invalidate_on_unauthorized: bool,
}

impl TokenServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            url: default_token_url(),
            timeout_in_ms: default_token_timeout(),
            ttl_in_seconds: default_token_ttl(),
            invalidate_on_unauthorized: false,
        }
    }
}

fn default_token_url() -> String {
    "http://localhost:8000/gettoken".to_string()
}

fn default_token_timeout() -> u64 {
    5000
}

fn default_token_ttl() -> u64 {
    3300
}

/// The third-party routing provider.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RoutingConfig {
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    #[serde(default = "default_routing_timeout")]
    pub timeout_in_ms: u64,
    /// Value of the `format` query parameter sent with every request.
    #[serde(default = "default_routing_format")]
    pub format: String,
}

impl RoutingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }

    pub fn find_route_url(&self) -> String {
        format!("{}/findRoute", self.base_url.trim_end_matches('/'))
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            timeout_in_ms: default_routing_timeout(),
            format: default_routing_format(),
        }
    }
}

fn default_routing_base_url() -> String {
    "https://api.iq.inrix.com".to_string()
}

fn default_routing_timeout() -> u64 {
    10000
}

fn default_routing_format() -> String {
    "json".to_string()
}

/// Waypoints and dwell used by `GET /schedule`.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ScheduleConfig {
    #[serde(default = "default_schedule_waypoints")]
    pub waypoints: Vec<Coordinate>,
    /// Minutes spent at each intermediate stop before the next leg departs.
    #[serde(default = "default_dwell_minutes")]
    pub dwell_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            waypoints: default_schedule_waypoints(),
            dwell_minutes: default_dwell_minutes(),
        }
    }
}

fn default_schedule_waypoints() -> Vec<Coordinate> {
    vec![
        Coordinate::new(37.7749, -122.4194),
        Coordinate::new(37.3382, -121.8863),
        Coordinate::new(37.8044, -122.2711),
    ]
}

fn default_dwell_minutes() -> u32 {
    60
}

/// The fixed pair served by `GET /route`.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct DemoRouteConfig {
    #[serde(default = "default_demo_from")]
    pub from: Coordinate,
    #[serde(default = "default_demo_to")]
    pub to: Coordinate,
}

impl Default for DemoRouteConfig {
    fn default() -> Self {
        Self {
            from: default_demo_from(),
            to: default_demo_to(),
        }
    }
}

fn default_demo_from() -> Coordinate {
    Coordinate::new(37.770581, -122.442550)
}

fn default_demo_to() -> Coordinate {
    Coordinate::new(37.765297, -122.442527)
}
