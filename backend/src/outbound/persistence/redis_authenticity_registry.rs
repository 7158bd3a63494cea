//! Redis-backed `TripAuthenticityRegistry`.
//!
//! Records live under `valid-trip:{sha256}` and are written with `SET NX`, so
//! a trip surfaced twice keeps its first record and expiry.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{RedisError, cmd};

use crate::domain::ports::{
    RegistrationOutcome, TripAuthenticityRegistry, TripAuthenticityRegistryError,
};
use crate::domain::{Trip, TripFingerprint};

use super::pool::{PoolError, RedisPool};

fn map_pool_error(error: PoolError) -> TripAuthenticityRegistryError {
    TripAuthenticityRegistryError::connection(error.to_string())
}

fn map_redis_error(error: RedisError) -> TripAuthenticityRegistryError {
    if error.is_io_error() || error.is_connection_dropped() {
        TripAuthenticityRegistryError::connection(error.to_string())
    } else {
        TripAuthenticityRegistryError::query(error.to_string())
    }
}

/// Authenticity registry storing fingerprints in Redis.
#[derive(Clone)]
pub struct RedisTripAuthenticityRegistry {
    pool: RedisPool,
    ttl: Option<Duration>,
}

impl RedisTripAuthenticityRegistry {
    /// `ttl` of `None` keeps records forever.
    pub fn new(pool: RedisPool, ttl: Option<Duration>) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait]
impl TripAuthenticityRegistry for RedisTripAuthenticityRegistry {
    async fn register(
        &self,
        trip: &Trip,
    ) -> Result<RegistrationOutcome, TripAuthenticityRegistryError> {
        let key = TripFingerprint::of(trip).storage_key();
        let encoded = serde_json::to_string(trip)
            .map_err(|err| TripAuthenticityRegistryError::serialization(err.to_string()))?;

        let mut command = cmd("SET");
        command.arg(&key).arg(encoded).arg("NX");
        if let Some(ttl) = self.ttl {
            command.arg("EX").arg(ttl.as_secs().max(1));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let written: Option<String> = command
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;

        Ok(match written {
            Some(_) => RegistrationOutcome::Registered,
            None => RegistrationOutcome::AlreadyKnown,
        })
    }

    async fn is_authentic(&self, trip: &Trip) -> Result<bool, TripAuthenticityRegistryError> {
        let key = TripFingerprint::of(trip).storage_key();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let exists: bool = cmd("EXISTS")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(exists)
    }
}
