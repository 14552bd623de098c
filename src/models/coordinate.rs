use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A waypoint in decimal degrees.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses a latitude/longitude pair taken from query parameters.
    /// Returns `None` unless both values are finite numbers.
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lng = lng.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { lat, lng })
    }
}

/// The `lat,lng` form the routing provider expects for `wp_*` parameters.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
