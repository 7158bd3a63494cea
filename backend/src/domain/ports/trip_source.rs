//! Driven port for the external trip provider.
//!
//! Adapters return only trips whose origin and destination match the request
//! exactly; entries that fail validation are dropped by the adapter.

use async_trait::async_trait;

use crate::domain::{LocationCode, Trip, TripDraft};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the trip provider.
    pub enum TripSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } => "trip provider transport failed: {message}",
        /// The provider did not answer within the configured timeout.
        Timeout { message: String } => "trip provider timeout: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } =>
            "trip provider returned status {status}: {message}",
        /// The response body could not be decoded as a list of trips.
        Decode { message: String } => "trip provider response decode failed: {message}",
    }
}

/// Port for fetching candidate trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripSource: Send + Sync {
    /// Fetch trips from `origin` to `destination` in provider order.
    async fn search_candidates(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<Vec<Trip>, TripSourceError>;

    /// Whether the provider serves `code`.
    fn is_location_supported(&self, code: &LocationCode) -> bool;
}

/// Offline source producing a deterministic set of trips for any supported
/// pair of locations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripSource;

const FIXTURE_TRIPS: [(&str, f64, f64); 3] = [
    ("flight", 320.0, 5.5),
    ("train", 140.0, 26.0),
    ("bus", 85.0, 41.0),
];

#[async_trait]
impl TripSource for FixtureTripSource {
    async fn search_candidates(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<Vec<Trip>, TripSourceError> {
        FIXTURE_TRIPS
            .iter()
            .enumerate()
            .map(|(index, (mode, cost, duration))| {
                Trip::try_from(TripDraft {
                    id: format!("fixture-{origin}-{destination}-{}", index + 1),
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    cost: *cost,
                    duration: *duration,
                    transport_type: (*mode).to_owned(),
                    display_name: format!("{mode} from {origin} to {destination}"),
                })
                .map_err(|err| TripSourceError::decode(err.to_string()))
            })
            .collect()
    }

    fn is_location_supported(&self, code: &LocationCode) -> bool {
        code.is_supported()
    }
}
