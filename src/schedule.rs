//! Multi-stop schedules built from consecutive route legs.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Number, Value};
use tracing::{debug, info};

use crate::error::RelayError;
use crate::models::{Coordinate, Leg, Token};
use crate::upstream::RouteForwarder;

const TRAVEL_TIME_POINTER: &str = "/result/trip/routes/0/travelTimeMinutes";

/// The legs of a schedule together with its elapsed-time accumulators.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub legs: Vec<Leg>,
    /// Sum of provider travel times over all legs.
    pub travel_minutes: f64,
    /// Dwell spent at intermediate stops.
    pub dwell_minutes: f64,
}

impl Schedule {
    pub fn total_minutes(&self) -> f64 {
        self.travel_minutes + self.dwell_minutes
    }
}

/// Reads `result.trip.routes[0].travelTimeMinutes` from a provider response.
pub fn travel_time_minutes(route: &Value) -> Option<Number> {
    match route.pointer(TRAVEL_TIME_POINTER) {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|m| m.is_finite() && m >= 0.0) => {
            Some(n.clone())
        }
        _ => None,
    }
}

/// `at` shifted forward by `minutes`, or `None` when the result leaves the
/// representable range.
fn after_minutes(at: DateTime<Utc>, minutes: f64) -> Option<DateTime<Utc>> {
    let millis = (minutes * 60_000.0).round();
    if !(0.0..i64::MAX as f64).contains(&millis) {
        return None;
    }
    at.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}

/// Requests every consecutive pair of `waypoints` and lays the legs out in time.
///
/// The first leg departs at `start`. Each later leg departs `dwell_minutes`
/// after the previous arrival. The first failing leg aborts the whole schedule.
pub async fn build_schedule(
    forwarder: &RouteForwarder,
    token: &Token,
    waypoints: &[Coordinate],
    dwell_minutes: u32,
    start: DateTime<Utc>,
) -> Result<Schedule, RelayError> {
    let mut legs = Vec::with_capacity(waypoints.len().saturating_sub(1));
    let mut travel_elapsed = 0.0_f64;
    let mut dwell_elapsed = 0.0_f64;

    for (index, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        if index > 0 {
            dwell_elapsed += f64::from(dwell_minutes);
        }

        let route = forwarder.get_route(&from, &to, token).await.map_err(|e| {
            debug!("Schedule leg {} ({} -> {}) failed: {}", index, from, to, e);
            e
        })?;
        let travel = travel_time_minutes(&route).ok_or(RelayError::MalformedRoute)?;
        let travel_value = travel.as_f64().ok_or(RelayError::MalformedRoute)?;

        let departure_time = after_minutes(start, travel_elapsed + dwell_elapsed)
            .ok_or(RelayError::MalformedRoute)?;
        let arrival_time =
            after_minutes(departure_time, travel_value).ok_or(RelayError::MalformedRoute)?;
        travel_elapsed += travel_value;

        legs.push(Leg {
            from,
            to,
            departure_time,
            arrival_time,
            travel_time_minutes: travel,
        });
    }

    info!(
        event_name = "schedule.built",
        event_domain = "schedule",
        legs = legs.len(),
        travel_minutes = travel_elapsed,
        dwell_minutes = dwell_elapsed,
        "schedule built"
    );

    Ok(Schedule {
        legs,
        travel_minutes: travel_elapsed,
        dwell_minutes: dwell_elapsed,
    })
}
