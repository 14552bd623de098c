use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Number;

use super::Coordinate;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One segment of a schedule between two consecutive waypoints.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Leg {
    pub from: Coordinate,
    pub to: Coordinate,
    #[serde(serialize_with = "utc_seconds")]
    pub departure_time: DateTime<Utc>,
    #[serde(serialize_with = "utc_seconds")]
    pub arrival_time: DateTime<Utc>,
    /// Travel time as reported by the routing provider.
    pub travel_time_minutes: Number,
}

fn utc_seconds<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_timestamps_as_utc_seconds() {
        let departure = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let leg = Leg {
            from: Coordinate::new(37.7749, -122.4194),
            to: Coordinate::new(37.3382, -121.8863),
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(42),
            travel_time_minutes: Number::from(42),
        };

        assert_eq!(
            serde_json::to_value(&leg).unwrap(),
            json!({
                "from": {"lat": 37.7749, "lng": -122.4194},
                "to": {"lat": 37.3382, "lng": -121.8863},
                "departure_time": "2024-03-01T08:00:00Z",
                "arrival_time": "2024-03-01T08:42:00Z",
                "travel_time_minutes": 42
            })
        );
    }
}
