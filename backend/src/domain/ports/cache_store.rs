//! Port for a string key-value cache with per-entry expiry.
use std::time::Duration;

use async_trait::async_trait;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum CacheStoreError {
        /// Cache backend could not be reached.
        Connection { message: String } => "cache connection failed: {message}",
        /// Cache backend rejected or failed a command.
        Backend { message: String } => "cache backend failure: {message}",
    }
}

/// Key-value cache used for search results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`. Expired entries read as `None`.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheStoreError>;

    /// Store `value` under `key`, replacing any previous value. `None` keeps
    /// the entry until it is deleted.
    async fn set(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError>;

    /// Remove `key`, returning whether an entry existed.
    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheStoreError>;
}

/// Cache that never retains anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCacheStore;

#[async_trait]
impl CacheStore for FixtureCacheStore {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheStoreError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &CacheKey,
        _value: &str,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError> {
        Ok(())
    }

    async fn delete(&self, _key: &CacheKey) -> Result<bool, CacheStoreError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_cache_always_misses() {
        let cache = FixtureCacheStore;
        let key = CacheKey::new("trips:JFK:LAX").expect("key");
        cache.set(&key, "[]", None).await.expect("set succeeds");
        assert_eq!(cache.get(&key).await.expect("get succeeds"), None);
        assert!(!cache.delete(&key).await.expect("delete succeeds"));
    }
}
