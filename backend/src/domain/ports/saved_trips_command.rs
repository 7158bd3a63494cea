//! Driving port for saving and deleting trips.
//!
//! Inbound adapters hand over the raw payload; validation and the
//! authenticity check happen behind the port.

use async_trait::async_trait;

use crate::domain::{Error, Trip, TripPayload};

/// Domain use-case port for saved-trip mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedTripsCommand: Send + Sync {
    /// Validate and persist a trip previously surfaced by a search.
    async fn save(&self, payload: TripPayload) -> Result<Trip, Error>;

    /// Delete a saved trip. Returns `false` when no trip had that id.
    async fn delete(&self, id: &str) -> Result<bool, Error>;
}

/// Fixture command that validates payloads but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedTripsCommand;

#[async_trait]
impl SavedTripsCommand for FixtureSavedTripsCommand {
    async fn save(&self, payload: TripPayload) -> Result<Trip, Error> {
        Trip::try_from(payload)
            .map_err(|err| Error::invalid_request(err.to_string()).with_details(err.details()))
    }

    async fn delete(&self, _id: &str) -> Result<bool, Error> {
        Ok(false)
    }
}
