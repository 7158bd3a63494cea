//! DTOs for decoding the trip provider's JSON response.
//!
//! The body must be a JSON array. Entries are filtered on their raw
//! origin/destination before validation so that unrelated junk from the
//! provider does not inflate the rejection count.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{LocationCode, Trip, TripPayload};

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct TripListDto(Vec<Value>);

/// Trips kept from one response plus the number of matching entries dropped.
#[derive(Debug, Default)]
pub(super) struct DecodedTrips {
    pub(super) trips: Vec<Trip>,
    pub(super) rejected: usize,
}

fn matches_route(entry: &Value, origin: &LocationCode, destination: &LocationCode) -> bool {
    entry.get("origin").and_then(Value::as_str) == Some(origin.as_str())
        && entry.get("destination").and_then(Value::as_str) == Some(destination.as_str())
}

fn into_trip(entry: Value) -> Option<Trip> {
    let payload: TripPayload = serde_json::from_value(entry).ok()?;
    Trip::try_from(payload).ok()
}

impl TripListDto {
    pub(super) fn into_matching_trips(
        self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> DecodedTrips {
        let mut decoded = DecodedTrips::default();
        for entry in self.0 {
            if !matches_route(&entry, origin, destination) {
                continue;
            }
            match into_trip(entry) {
                Some(trip) => decoded.trips.push(trip),
                None => decoded.rejected += 1,
            }
        }
        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code(raw: &str) -> LocationCode {
        LocationCode::new(raw).expect("valid code")
    }

    fn entry(id: &str, origin: &str, destination: &str, cost: Value) -> Value {
        json!({
            "id": id,
            "origin": origin,
            "destination": destination,
            "cost": cost,
            "duration": 5,
            "type": "flight",
            "display_name": format!("trip {id}")
        })
    }

    #[test]
    fn keeps_only_exact_route_matches_in_order() {
        let dto: TripListDto = serde_json::from_value(json!([
            entry("a", "JFK", "LAX", json!(300)),
            entry("b", "JFK", "SFO", json!(100)),
            entry("c", "jfk", "LAX", json!(100)),
            entry("d", "JFK", "LAX", json!(250)),
        ]))
        .expect("array body");

        let decoded = dto.into_matching_trips(&code("JFK"), &code("LAX"));
        let ids: Vec<_> = decoded.trips.iter().map(|t| t.id().as_str()).collect();

        assert_eq!(ids, ["a", "d"]);
        assert_eq!(decoded.rejected, 0);
    }

    #[test]
    fn counts_invalid_matching_entries() {
        let dto: TripListDto = serde_json::from_value(json!([
            entry("a", "JFK", "LAX", json!("300")),
            entry("b", "JFK", "LAX", json!(120)),
            { "origin": "JFK", "destination": "LAX" },
        ]))
        .expect("array body");

        let decoded = dto.into_matching_trips(&code("JFK"), &code("LAX"));

        assert_eq!(decoded.trips.len(), 1);
        assert_eq!(decoded.rejected, 2);
    }

    #[test]
    fn non_array_bodies_fail_to_decode() {
        assert!(serde_json::from_value::<TripListDto>(json!({ "trips": [] })).is_err());
    }
}
