//! Redis-backed `TripRepository` implementation.
//!
//! Each trip is a JSON string under `trip:{id}` without expiry; the set
//! `trips:all` indexes every saved id. The two writes are not transactional.

use async_trait::async_trait;
use bb8_redis::redis::{RedisError, cmd};
use tracing::{debug, warn};

use crate::domain::ports::{TripRepository, TripRepositoryError};
use crate::domain::{Trip, TripId};

use super::pool::{PoolError, RedisPool};

/// Prefix of per-trip record keys.
pub const TRIP_KEY_PREFIX: &str = "trip:";
/// Set holding every saved trip id.
pub const TRIP_INDEX_KEY: &str = "trips:all";

fn trip_key(id: &str) -> String {
    format!("{TRIP_KEY_PREFIX}{id}")
}

fn map_pool_error(error: PoolError) -> TripRepositoryError {
    TripRepositoryError::connection(error.to_string())
}

fn map_redis_error(error: RedisError) -> TripRepositoryError {
    if error.is_io_error() || error.is_connection_dropped() {
        TripRepositoryError::connection(error.to_string())
    } else {
        TripRepositoryError::query(error.to_string())
    }
}

fn decode_record(id: &str, raw: &str) -> Option<Trip> {
    match serde_json::from_str::<Trip>(raw) {
        Ok(trip) => Some(trip),
        Err(error) => {
            warn!(trip_id = id, %error, "stored trip failed to decode; skipping");
            None
        }
    }
}

/// Pair index entries with their `MGET` replies, dropping ids whose record
/// is gone or unreadable.
fn collect_indexed(ids: &[String], records: Vec<Option<String>>) -> Vec<Trip> {
    ids.iter()
        .zip(records)
        .filter_map(|(id, record)| match record {
            Some(raw) => decode_record(id, &raw),
            None => {
                warn!(trip_id = %id, "indexed trip has no record; skipping");
                None
            }
        })
        .collect()
}

/// The record is already gone once `DEL` succeeds, so a failed `SREM` only
/// leaves a dangling index entry that listing skips.
fn record_unindexed(id: &TripId, unindexed: Result<i64, RedisError>) -> bool {
    if let Err(error) = unindexed {
        warn!(trip_id = %id, %error, "trip deleted but index removal failed");
    }
    true
}

/// Trip repository storing records in Redis.
#[derive(Clone)]
pub struct RedisTripRepository {
    pool: RedisPool,
}

impl RedisTripRepository {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for RedisTripRepository {
    async fn save(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let encoded = serde_json::to_string(trip)
            .map_err(|err| TripRepositoryError::serialization(err.to_string()))?;
        let id = trip.id().as_str();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let _: () = cmd("SET")
            .arg(trip_key(id))
            .arg(encoded)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        let _: i64 = cmd("SADD")
            .arg(TRIP_INDEX_KEY)
            .arg(id)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;

        debug!(trip_id = id, "stored trip record");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<String> = cmd("SMEMBERS")
            .arg(TRIP_INDEX_KEY)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| trip_key(id)).collect();
        let records: Vec<Option<String>> = match cmd("MGET").arg(&keys).query_async(&mut *conn).await
        {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, count = ids.len(), "failed to read indexed trip records");
                return Ok(Vec::new());
            }
        };

        Ok(collect_indexed(&ids, records))
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let record: Option<String> = cmd("GET")
            .arg(trip_key(id.as_str()))
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(record.and_then(|raw| decode_record(id.as_str(), &raw)))
    }

    async fn delete(&self, id: &TripId) -> Result<bool, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed: i64 = cmd("DEL")
            .arg(trip_key(id.as_str()))
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        if removed == 0 {
            return Ok(false);
        }

        let unindexed: Result<i64, RedisError> = cmd("SREM")
            .arg(TRIP_INDEX_KEY)
            .arg(id.as_str())
            .query_async(&mut *conn)
            .await;
        Ok(record_unindexed(id, unindexed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb8_redis::redis::ErrorKind;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stored_record() -> String {
        serde_json::json!({
            "id": "a1",
            "origin": "JFK",
            "destination": "LAX",
            "cost": 300,
            "duration": 6,
            "type": "flight",
            "display_name": "Nonstop",
        })
        .to_string()
    }

    #[rstest]
    fn record_keys_use_trip_prefix() {
        assert_eq!(trip_key("a1"), "trip:a1");
    }

    #[rstest]
    fn undecodable_records_are_skipped() {
        assert!(decode_record("a1", r#"{"id":"a1","cost":"300"}"#).is_none());
        assert!(decode_record("a1", "not json").is_none());
    }

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, TripRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn listing_skips_ids_without_records(stored_record: String) {
        let ids = vec!["a1".to_owned(), "gone".to_owned(), "bad".to_owned()];
        let records = vec![Some(stored_record), None, Some("{".to_owned())];

        let trips = collect_indexed(&ids, records);

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id().as_str(), "a1");
    }

    #[rstest]
    fn failed_index_removal_still_reports_deletion() {
        let id = TripId::new("a1").expect("id");
        let failure = RedisError::from((ErrorKind::Io, "broken pipe"));

        assert!(record_unindexed(&id, Err(failure)));
        assert!(record_unindexed(&id, Ok(1)));
    }
}
