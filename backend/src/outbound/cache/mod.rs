//! Redis-backed `CacheStore` adapter.
//!
//! Values are stored as plain strings. Expiry is delegated to Redis via
//! `SET ... EX`, so stale entries simply read back as misses.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{RedisError, cmd};

use crate::domain::ports::{CacheKey, CacheStore, CacheStoreError};
use crate::outbound::persistence::{PoolError, RedisPool};

fn map_pool_error(error: PoolError) -> CacheStoreError {
    CacheStoreError::connection(error.to_string())
}

fn map_redis_error(error: RedisError) -> CacheStoreError {
    if error.is_io_error() || error.is_connection_dropped() {
        CacheStoreError::connection(error.to_string())
    } else {
        CacheStoreError::backend(error.to_string())
    }
}

/// Cache store backed by a shared [`RedisPool`].
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: RedisPool,
}

impl RedisCacheStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let value: Option<String> = cmd("GET")
            .arg(key.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(value)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError> {
        let mut command = cmd("SET");
        command.arg(key.as_str()).arg(value);
        if let Some(ttl) = ttl {
            command.arg("EX").arg(ttl.as_secs().max(1));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _: () = command
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed: i64 = cmd("DEL")
            .arg(key.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(removed > 0)
    }
}
