//! Driving port for reading saved trips.

use async_trait::async_trait;

use crate::domain::{Error, Trip};

/// Domain use-case port for saved-trip reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedTripsQuery: Send + Sync {
    /// Every saved trip that can be read back.
    async fn list(&self) -> Result<Vec<Trip>, Error>;

    /// One saved trip, or `None` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Trip>, Error>;
}

/// Fixture query with no saved trips.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedTripsQuery;

#[async_trait]
impl SavedTripsQuery for FixtureSavedTripsQuery {
    async fn list(&self) -> Result<Vec<Trip>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: &str) -> Result<Option<Trip>, Error> {
        Ok(None)
    }
}
