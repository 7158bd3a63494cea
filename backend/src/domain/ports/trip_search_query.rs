//! Driving port for trip searches.

use async_trait::async_trait;

use crate::domain::{Error, Trip, TripSearchRequest};

/// Domain use-case port for searching trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripSearchQuery: Send + Sync {
    /// Trips between the requested locations, ordered by `request.sort_by`.
    async fn search(&self, request: &TripSearchRequest) -> Result<Vec<Trip>, Error>;
}

/// Fixture query returning no trips.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripSearchQuery;

#[async_trait]
impl TripSearchQuery for FixtureTripSearchQuery {
    async fn search(&self, _request: &TripSearchRequest) -> Result<Vec<Trip>, Error> {
        Ok(Vec::new())
    }
}
