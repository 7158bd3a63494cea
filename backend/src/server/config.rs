//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use trip_backend::domain::ports::TripSource;
use trip_backend::domain::trip_search_service::DEFAULT_CACHE_TTL;
use trip_backend::outbound::persistence::RedisPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) redis_pool: Option<RedisPool>,
    pub(crate) trip_source: Option<Arc<dyn TripSource>>,
    pub(crate) cache_ttl: Duration,
    pub(crate) authenticity_ttl: Option<Duration>,
}

impl ServerConfig {
    /// Configuration using in-memory storage and the fixture trip source.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            redis_pool: None,
            trip_source: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            authenticity_ttl: None,
        }
    }

    /// Attach a Redis pool; the cache, registry and repository then use it.
    #[must_use]
    pub fn with_redis_pool(mut self, pool: RedisPool) -> Self {
        self.redis_pool = Some(pool);
        self
    }

    /// Use a real trip provider instead of the fixture source.
    #[must_use]
    pub fn with_trip_source(mut self, source: Arc<dyn TripSource>) -> Self {
        self.trip_source = Some(source);
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Expire authenticity fingerprints after `ttl`. `None` keeps them forever.
    #[must_use]
    pub fn with_authenticity_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.authenticity_ttl = ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
