//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CacheStore`, `TripSource`, `TripRepository`,
//! `TripAuthenticityRegistry`) are implemented by outbound adapters. Driving
//! ports (`TripSearchQuery`, `SavedTripsCommand`, `SavedTripsQuery`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod cache_store;
mod saved_trips_command;
mod saved_trips_query;
mod trip_authenticity_registry;
mod trip_repository;
mod trip_search_query;
mod trip_source;

pub use cache_key::{CacheKey, CacheKeyValidationError, TRIP_SEARCH_KEY_PREFIX};
#[cfg(test)]
pub use cache_store::MockCacheStore;
pub use cache_store::{CacheStore, CacheStoreError, FixtureCacheStore};
#[cfg(test)]
pub use saved_trips_command::MockSavedTripsCommand;
pub use saved_trips_command::{FixtureSavedTripsCommand, SavedTripsCommand};
#[cfg(test)]
pub use saved_trips_query::MockSavedTripsQuery;
pub use saved_trips_query::{FixtureSavedTripsQuery, SavedTripsQuery};
#[cfg(test)]
pub use trip_authenticity_registry::MockTripAuthenticityRegistry;
pub use trip_authenticity_registry::{
    FixtureTripAuthenticityRegistry, RegistrationOutcome, TripAuthenticityRegistry,
    TripAuthenticityRegistryError,
};
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::{FixtureTripRepository, TripRepository, TripRepositoryError};
#[cfg(test)]
pub use trip_search_query::MockTripSearchQuery;
pub use trip_search_query::{FixtureTripSearchQuery, TripSearchQuery};
#[cfg(test)]
pub use trip_source::MockTripSource;
pub use trip_source::{FixtureTripSource, TripSource, TripSourceError};
