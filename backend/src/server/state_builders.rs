//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use trip_backend::domain::ports::{
    CacheStore, FixtureTripSource, TripAuthenticityRegistry, TripRepository, TripSource,
};
use trip_backend::domain::{SavedTripsService, TripSearchService};
use trip_backend::inbound::http::state::HttpState;
use trip_backend::outbound::cache::RedisCacheStore;
use trip_backend::outbound::memory::{
    InMemoryCacheStore, InMemoryTripAuthenticityRegistry, InMemoryTripRepository,
};
use trip_backend::outbound::persistence::{RedisTripAuthenticityRegistry, RedisTripRepository};

use super::ServerConfig;

/// Storage adapters shared by the search and saved-trip services.
///
/// Both services must see the same registry so that trips surfaced by a
/// search can be saved afterwards.
struct StorageAdapters {
    cache: Arc<dyn CacheStore>,
    registry: Arc<dyn TripAuthenticityRegistry>,
    repository: Arc<dyn TripRepository>,
}

fn build_storage(config: &ServerConfig) -> StorageAdapters {
    match &config.redis_pool {
        Some(pool) => {
            info!("using Redis-backed cache, registry and repository");
            StorageAdapters {
                cache: Arc::new(RedisCacheStore::new(pool.clone())),
                registry: Arc::new(RedisTripAuthenticityRegistry::new(
                    pool.clone(),
                    config.authenticity_ttl,
                )),
                repository: Arc::new(RedisTripRepository::new(pool.clone())),
            }
        }
        None => {
            warn!("no Redis URL configured; state is kept in memory and lost on restart");
            StorageAdapters {
                cache: Arc::new(InMemoryCacheStore::new()),
                registry: Arc::new(InMemoryTripAuthenticityRegistry::new(
                    config.authenticity_ttl,
                )),
                repository: Arc::new(InMemoryTripRepository::new()),
            }
        }
    }
}

fn build_trip_source(config: &ServerConfig) -> Arc<dyn TripSource> {
    match &config.trip_source {
        Some(source) => Arc::clone(source),
        None => {
            warn!("no trip provider configured; serving fixture trips");
            Arc::new(FixtureTripSource)
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let StorageAdapters {
        cache,
        registry,
        repository,
    } = build_storage(config);

    let search = TripSearchService::new(
        build_trip_source(config),
        cache,
        Arc::clone(&registry),
        config.cache_ttl,
    );
    let saved = Arc::new(SavedTripsService::new(repository, registry));

    web::Data::new(HttpState::new(Arc::new(search), saved.clone(), saved))
}
