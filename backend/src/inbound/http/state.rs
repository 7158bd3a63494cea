//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSavedTripsCommand, FixtureSavedTripsQuery, FixtureTripSearchQuery, SavedTripsCommand,
    SavedTripsQuery, TripSearchQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub trip_search: Arc<dyn TripSearchQuery>,
    pub saved_trips: Arc<dyn SavedTripsCommand>,
    pub saved_trips_query: Arc<dyn SavedTripsQuery>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use trip_backend::domain::ports::{
    ///     FixtureSavedTripsCommand, FixtureSavedTripsQuery, FixtureTripSearchQuery,
    /// };
    /// use trip_backend::inbound::http::state::HttpState;
    ///
    /// let _state = HttpState::new(
    ///     Arc::new(FixtureTripSearchQuery),
    ///     Arc::new(FixtureSavedTripsCommand),
    ///     Arc::new(FixtureSavedTripsQuery),
    /// );
    /// ```
    pub fn new(
        trip_search: Arc<dyn TripSearchQuery>,
        saved_trips: Arc<dyn SavedTripsCommand>,
        saved_trips_query: Arc<dyn SavedTripsQuery>,
    ) -> Self {
        Self {
            trip_search,
            saved_trips,
            saved_trips_query,
        }
    }

    /// State backed entirely by fixture ports.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureTripSearchQuery),
            Arc::new(FixtureSavedTripsCommand),
            Arc::new(FixtureSavedTripsQuery),
        )
    }
}
