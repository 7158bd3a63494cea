//! Tests for the cache-aside trip search service.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{
    CacheStoreError, FixtureCacheStore, FixtureTripAuthenticityRegistry, MockCacheStore,
    MockTripAuthenticityRegistry, MockTripSource, TripAuthenticityRegistryError,
};
use crate::domain::{ErrorCode, SortBy, TripDraft};

type TestService = TripSearchService<MockTripSource, MockCacheStore, MockTripAuthenticityRegistry>;

const TTL: Duration = Duration::from_secs(60);

fn trip(id: &str, cost: f64, duration: f64) -> Trip {
    Trip::try_from(TripDraft {
        id: id.into(),
        origin: "JFK".into(),
        destination: "LAX".into(),
        cost,
        duration,
        transport_type: "flight".into(),
        display_name: format!("Flight {id}"),
    })
    .expect("valid trip")
}

fn request(sort_by: SortBy) -> TripSearchRequest {
    TripSearchRequest::new(
        LocationCode::new("JFK").expect("origin"),
        LocationCode::new("LAX").expect("destination"),
        sort_by,
    )
}

fn ids(trips: &[Trip]) -> Vec<&str> {
    trips.iter().map(|t| t.id().as_str()).collect()
}

#[fixture]
fn provider_trips() -> Vec<Trip> {
    vec![trip("a", 300.0, 5.0), trip("b", 250.0, 7.0)]
}

fn supporting_source() -> MockTripSource {
    let mut source = MockTripSource::new();
    source.expect_is_location_supported().returning(|_| true);
    source
}

fn make_service(
    source: MockTripSource,
    cache: MockCacheStore,
    registry: MockTripAuthenticityRegistry,
) -> TestService {
    TripSearchService::new(Arc::new(source), Arc::new(cache), Arc::new(registry), TTL)
}

#[rstest]
#[case("QQQ", "LAX", "origin")]
#[case("JFK", "QQQ", "destination")]
#[tokio::test]
async fn unsupported_location_fails_before_cache_or_source(
    #[case] origin: &str,
    #[case] destination: &str,
    #[case] field: &str,
) {
    let mut source = MockTripSource::new();
    source
        .expect_is_location_supported()
        .returning(|code| code.as_str() != "QQQ");
    source.expect_search_candidates().never();
    let mut cache = MockCacheStore::new();
    cache.expect_get().never();
    let service = make_service(source, cache, MockTripAuthenticityRegistry::new());

    let request = TripSearchRequest::parse(origin, destination, None).expect("well-formed");
    let err = service.search(&request).await.expect_err("unsupported");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({ "field": field, "code": "unsupported_location" }))
    );
}

#[rstest]
#[tokio::test]
async fn cache_miss_fetches_caches_registers_and_sorts(provider_trips: Vec<Trip>) {
    let mut source = supporting_source();
    let fetched = provider_trips.clone();
    source
        .expect_search_candidates()
        .times(1)
        .return_once(move |_, _| Ok(fetched));

    let expected_payload = serde_json::to_string(&provider_trips).expect("encode");
    let mut cache = MockCacheStore::new();
    cache.expect_get().times(1).return_once(|_| Ok(None));
    cache
        .expect_set()
        .withf(move |key, value, ttl| {
            key.as_str() == "trips:JFK:LAX" && value == expected_payload && *ttl == Some(TTL)
        })
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let mut registry = MockTripAuthenticityRegistry::new();
    registry
        .expect_register()
        .times(2)
        .returning(|_| Ok(RegistrationOutcome::Registered));

    let service = make_service(source, cache, registry);
    let trips = service
        .search(&request(SortBy::Cheapest))
        .await
        .expect("search succeeds");

    assert_eq!(ids(&trips), ["b", "a"]);
}

#[rstest]
#[tokio::test]
async fn cache_hit_skips_source_and_registry(provider_trips: Vec<Trip>) {
    let mut source = supporting_source();
    source.expect_search_candidates().never();

    let cached = serde_json::to_string(&provider_trips).expect("encode");
    let mut cache = MockCacheStore::new();
    cache
        .expect_get()
        .times(1)
        .return_once(move |_| Ok(Some(cached)));
    cache.expect_set().never();

    let mut registry = MockTripAuthenticityRegistry::new();
    registry.expect_register().never();

    let service = make_service(source, cache, registry);
    let trips = service
        .search(&request(SortBy::Fastest))
        .await
        .expect("search succeeds");

    assert_eq!(ids(&trips), ["a", "b"]);
}

#[rstest]
#[case::read_failure(Err(CacheStoreError::connection("refused")))]
#[case::undecodable(Ok(Some("{not json".to_owned())))]
#[case::invalid_records(Ok(Some(r#"[{"id":"x","cost":"300"}]"#.to_owned())))]
#[tokio::test]
async fn unusable_cache_reads_fall_back_to_source(
    provider_trips: Vec<Trip>,
    #[case] cached: Result<Option<String>, CacheStoreError>,
) {
    let mut source = supporting_source();
    source
        .expect_search_candidates()
        .times(1)
        .return_once(move |_, _| Ok(provider_trips));

    let mut cache = MockCacheStore::new();
    cache.expect_get().times(1).return_once(move |_| cached);
    cache.expect_set().times(1).return_once(|_, _, _| Ok(()));

    let mut registry = MockTripAuthenticityRegistry::new();
    registry
        .expect_register()
        .returning(|_| Ok(RegistrationOutcome::AlreadyKnown));

    let service = make_service(source, cache, registry);
    let trips = service
        .search(&request(SortBy::Cheapest))
        .await
        .expect("search succeeds");

    assert_eq!(trips.len(), 2);
}

#[rstest]
#[tokio::test]
async fn cache_write_and_registry_failures_are_swallowed(provider_trips: Vec<Trip>) {
    let mut source = supporting_source();
    source
        .expect_search_candidates()
        .times(1)
        .return_once(move |_, _| Ok(provider_trips));

    let mut cache = MockCacheStore::new();
    cache.expect_get().return_once(|_| Ok(None));
    cache
        .expect_set()
        .times(1)
        .return_once(|_, _, _| Err(CacheStoreError::backend("read only replica")));

    let mut registry = MockTripAuthenticityRegistry::new();
    registry
        .expect_register()
        .times(2)
        .returning(|_| Err(TripAuthenticityRegistryError::connection("refused")));

    let service = make_service(source, cache, registry);
    let trips = service
        .search(&request(SortBy::Cheapest))
        .await
        .expect("search still succeeds");

    assert_eq!(ids(&trips), ["b", "a"]);
}

#[rstest]
#[case::timeout(TripSourceError::timeout("10s elapsed"))]
#[case::status(TripSourceError::status(500_u16, "oops"))]
#[case::decode(TripSourceError::decode("expected array"))]
#[tokio::test]
async fn source_failures_become_upstream_errors(#[case] failure: TripSourceError) {
    let mut source = supporting_source();
    source
        .expect_search_candidates()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let mut cache = MockCacheStore::new();
    cache.expect_get().return_once(|_| Ok(None));
    cache.expect_set().never();

    let mut registry = MockTripAuthenticityRegistry::new();
    registry.expect_register().never();

    let service = make_service(source, cache, registry);
    let err = service
        .search(&request(SortBy::Cheapest))
        .await
        .expect_err("provider failure");

    assert_eq!(err.code(), ErrorCode::UpstreamFailure);
}

#[rstest]
#[tokio::test]
async fn empty_provider_result_is_cached() {
    let mut source = supporting_source();
    source
        .expect_search_candidates()
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let mut cache = MockCacheStore::new();
    cache.expect_get().return_once(|_| Ok(None));
    cache
        .expect_set()
        .withf(|_, value, _| value == "[]")
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let service = make_service(source, cache, MockTripAuthenticityRegistry::new());
    let trips = service
        .search(&request(SortBy::Fastest))
        .await
        .expect("search succeeds");

    assert!(trips.is_empty());
}

#[rstest]
#[tokio::test]
async fn non_retaining_cache_sends_every_search_to_source(provider_trips: Vec<Trip>) {
    let mut source = supporting_source();
    source
        .expect_search_candidates()
        .times(2)
        .returning(move |_, _| Ok(provider_trips.clone()));
    let service = TripSearchService::new(
        Arc::new(source),
        Arc::new(FixtureCacheStore),
        Arc::new(FixtureTripAuthenticityRegistry),
        TTL,
    );

    for _ in 0..2 {
        let trips = service
            .search(&request(SortBy::Fastest))
            .await
            .expect("search succeeds");
        assert_eq!(ids(&trips), ["a", "b"]);
    }
}
