//! Cache-aside trip search.
//!
//! A search validates both locations against the provider, then serves the
//! cached result list for the origin/destination pair when one exists. On a
//! miss it fetches from the provider, caches the raw list, and registers every
//! returned trip with the authenticity registry so it can be saved later.
//! Ordering is applied after retrieval, so both sort orders share one cache
//! entry. Cache and registry failures degrade to a provider call or a missing
//! registration; they never fail the search.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    CacheKey, CacheStore, RegistrationOutcome, TripAuthenticityRegistry, TripSearchQuery,
    TripSource, TripSourceError,
};
use crate::domain::{Error, LocationCode, Trip, TripSearchRequest};

/// Default lifetime of a cached search result.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Search service implementing [`TripSearchQuery`].
///
/// Ports may be concrete adapters or trait objects such as
/// `Arc<dyn TripSource>`.
pub struct TripSearchService<S: ?Sized, C: ?Sized, R: ?Sized> {
    source: Arc<S>,
    cache: Arc<C>,
    registry: Arc<R>,
    cache_ttl: Duration,
}

impl<S: ?Sized, C: ?Sized, R: ?Sized> Clone for TripSearchService<S, C, R> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
            registry: Arc::clone(&self.registry),
            cache_ttl: self.cache_ttl,
        }
    }
}

impl<S: ?Sized, C: ?Sized, R: ?Sized> TripSearchService<S, C, R> {
    /// Create a service caching results for `cache_ttl`.
    pub fn new(source: Arc<S>, cache: Arc<C>, registry: Arc<R>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache,
            registry,
            cache_ttl,
        }
    }
}

fn map_source_error(error: TripSourceError) -> Error {
    match error {
        TripSourceError::Timeout { message } => {
            Error::upstream_failure(format!("trip provider timed out: {message}"))
        }
        TripSourceError::Status { status, message } => {
            Error::upstream_failure(format!("trip provider returned status {status}"))
                .with_details(json!({ "status": status, "body": message }))
        }
        other => Error::upstream_failure(other.to_string()),
    }
}

fn unsupported_location(field: &'static str, code: &LocationCode) -> Error {
    Error::invalid_request(format!("unsupported {field}: {code}")).with_details(json!({
        "field": field,
        "code": "unsupported_location",
    }))
}

impl<S, C, R> TripSearchService<S, C, R>
where
    S: TripSource + ?Sized,
    C: CacheStore + ?Sized,
    R: TripAuthenticityRegistry + ?Sized,
{
    fn ensure_supported(&self, request: &TripSearchRequest) -> Result<(), Error> {
        if !self.source.is_location_supported(&request.origin) {
            return Err(unsupported_location("origin", &request.origin));
        }
        if !self.source.is_location_supported(&request.destination) {
            return Err(unsupported_location("destination", &request.destination));
        }
        Ok(())
    }

    async fn read_cache(&self, key: &CacheKey) -> Option<Vec<Trip>> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "trip search cache miss");
                return None;
            }
            Err(error) => {
                warn!(%key, %error, "trip search cache read failed; querying provider");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Trip>>(&raw) {
            Ok(trips) => {
                debug!(%key, count = trips.len(), "trip search cache hit");
                Some(trips)
            }
            Err(error) => {
                warn!(%key, %error, "cached trip list failed to decode; treating as miss");
                None
            }
        }
    }

    async fn write_cache(&self, key: &CacheKey, trips: &[Trip]) {
        let encoded = match serde_json::to_string(trips) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%key, %error, "failed to encode trips for caching");
                return;
            }
        };
        match self.cache.set(key, &encoded, Some(self.cache_ttl)).await {
            Ok(()) => debug!(%key, ttl_secs = self.cache_ttl.as_secs(), "cached trip search"),
            Err(error) => warn!(%key, %error, "trip search cache write failed"),
        }
    }

    async fn register_all(&self, trips: &[Trip]) {
        let outcomes = join_all(trips.iter().map(|trip| self.registry.register(trip))).await;
        let mut registered = 0_usize;
        for (trip, outcome) in trips.iter().zip(outcomes) {
            match outcome {
                Ok(RegistrationOutcome::Registered) => registered += 1,
                Ok(RegistrationOutcome::AlreadyKnown) => {}
                Err(error) => warn!(trip_id = %trip.id(), %error, "failed to register trip"),
            }
        }
        debug!(registered, total = trips.len(), "registered surfaced trips");
    }
}

#[async_trait]
impl<S, C, R> TripSearchQuery for TripSearchService<S, C, R>
where
    S: TripSource + ?Sized,
    C: CacheStore + ?Sized,
    R: TripAuthenticityRegistry + ?Sized,
{
    async fn search(&self, request: &TripSearchRequest) -> Result<Vec<Trip>, Error> {
        self.ensure_supported(request)?;
        let key = CacheKey::trip_search(&request.origin, &request.destination);

        if let Some(mut trips) = self.read_cache(&key).await {
            request.sort_by.apply(&mut trips);
            return Ok(trips);
        }

        let mut trips = self
            .source
            .search_candidates(&request.origin, &request.destination)
            .await
            .map_err(map_source_error)?;

        self.write_cache(&key, &trips).await;
        self.register_all(&trips).await;

        request.sort_by.apply(&mut trips);
        Ok(trips)
    }
}

#[cfg(test)]
#[path = "trip_search_service_tests.rs"]
mod tests;
