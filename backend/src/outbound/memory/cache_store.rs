//! In-process `CacheStore` with lazy expiry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::ports::{CacheKey, CacheStore, CacheStoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

/// Cache store backed by a mutex-guarded map. Expired entries are dropped
/// when next touched.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Entry>) -> T,
    ) -> Result<T, CacheStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| CacheStoreError::backend("in-memory cache lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheStoreError> {
        let now = Instant::now();
        self.with_entries(|entries| match entries.get(key.as_str()) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key.as_str());
                None
            }
            None => None,
        })
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError> {
        let entry = Entry {
            value: value.to_owned(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.with_entries(|entries| {
            entries.insert(key.as_str().to_owned(), entry);
        })
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheStoreError> {
        let now = Instant::now();
        self.with_entries(|entries| {
            entries
                .remove(key.as_str())
                .is_some_and(|entry| entry.is_live(now))
        })
    }
}
