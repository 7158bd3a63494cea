//! Port for persisting user-saved trips.
//!
//! Each trip is stored once under its id and listed in an index of all saved
//! ids. Records carry no expiry.

use async_trait::async_trait;

use crate::domain::{Trip, TripId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by trip repository adapters.
    pub enum TripRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "trip repository connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "trip repository query failed: {message}",
        /// A trip could not be encoded for storage.
        Serialization { message: String } =>
            "trip repository serialisation failed: {message}",
    }
}

/// Port for saved-trip storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Store `trip` under its id and add the id to the index. Saving an id
    /// twice overwrites the record.
    async fn save(&self, trip: &Trip) -> Result<(), TripRepositoryError>;

    /// Every readable saved trip. Records that are missing or fail to decode
    /// are skipped; only a failure to read the index is an error.
    async fn find_all(&self) -> Result<Vec<Trip>, TripRepositoryError>;

    /// Fetch one trip by id.
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripRepositoryError>;

    /// Remove the record and its index entry. Returns `false` when no record
    /// existed.
    async fn delete(&self, id: &TripId) -> Result<bool, TripRepositoryError>;
}

/// Repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripRepository;

#[async_trait]
impl TripRepository for FixtureTripRepository {
    async fn save(&self, _trip: &Trip) -> Result<(), TripRepositoryError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Trip>, TripRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &TripId) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &TripId) -> Result<bool, TripRepositoryError> {
        Ok(false)
    }
}
