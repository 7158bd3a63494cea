//! Saved-trip use cases.
//!
//! Saving requires the trip to be structurally valid and its fingerprint to be
//! known to the authenticity registry, i.e. the exact trip was returned by an
//! earlier search. Nothing here mutates authenticity state.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    SavedTripsCommand, SavedTripsQuery, TripAuthenticityRegistry, TripAuthenticityRegistryError,
    TripRepository, TripRepositoryError,
};
use crate::domain::{Error, Trip, TripId, TripPayload};

/// Saved-trip service implementing the driving ports.
pub struct SavedTripsService<P: ?Sized, R: ?Sized> {
    repository: Arc<P>,
    registry: Arc<R>,
}

impl<P: ?Sized, R: ?Sized> Clone for SavedTripsService<P, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P: ?Sized, R: ?Sized> SavedTripsService<P, R> {
    /// Create a new service with the given repository and registry.
    pub fn new(repository: Arc<P>, registry: Arc<R>) -> Self {
        Self {
            repository,
            registry,
        }
    }
}

fn map_repository_error(error: TripRepositoryError) -> Error {
    match error {
        TripRepositoryError::Connection { message } | TripRepositoryError::Query { message } => {
            Error::service_unavailable(format!("trip repository unavailable: {message}"))
        }
        TripRepositoryError::Serialization { message } => {
            Error::internal(format!("trip repository serialisation failed: {message}"))
        }
    }
}

fn map_registry_error(error: TripAuthenticityRegistryError) -> Error {
    match error {
        TripAuthenticityRegistryError::Connection { message }
        | TripAuthenticityRegistryError::Query { message } => Error::service_unavailable(format!(
            "authenticity registry unavailable: {message}"
        )),
        TripAuthenticityRegistryError::Serialization { message } => Error::internal(format!(
            "authenticity registry serialisation failed: {message}"
        )),
    }
}

fn parse_id(raw: &str) -> Result<TripId, Error> {
    TripId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "code": "empty_id",
        }))
    })
}

impl<P, R> SavedTripsService<P, R>
where
    P: TripRepository + ?Sized,
    R: TripAuthenticityRegistry + ?Sized,
{
    async fn ensure_authentic(&self, trip: &Trip) -> Result<(), Error> {
        let authentic = self
            .registry
            .is_authentic(trip)
            .await
            .map_err(map_registry_error)?;
        if authentic {
            return Ok(());
        }
        Err(
            Error::invalid_request("trip was not returned by a previous search").with_details(
                json!({
                    "code": "unknown_trip",
                    "id": trip.id().as_str(),
                }),
            ),
        )
    }
}

#[async_trait]
impl<P, R> SavedTripsCommand for SavedTripsService<P, R>
where
    P: TripRepository + ?Sized,
    R: TripAuthenticityRegistry + ?Sized,
{
    async fn save(&self, payload: TripPayload) -> Result<Trip, Error> {
        let trip = Trip::try_from(payload)
            .map_err(|err| Error::invalid_request(err.to_string()).with_details(err.details()))?;
        self.ensure_authentic(&trip).await?;
        self.repository
            .save(&trip)
            .await
            .map_err(map_repository_error)?;
        debug!(trip_id = %trip.id(), "saved trip");
        Ok(trip)
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let id = parse_id(id)?;
        let removed = self
            .repository
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        debug!(trip_id = %id, removed, "deleted trip");
        Ok(removed)
    }
}

#[async_trait]
impl<P, R> SavedTripsQuery for SavedTripsService<P, R>
where
    P: TripRepository + ?Sized,
    R: TripAuthenticityRegistry + ?Sized,
{
    async fn list(&self) -> Result<Vec<Trip>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &str) -> Result<Option<Trip>, Error> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "saved_trips_service_tests.rs"]
mod tests;
