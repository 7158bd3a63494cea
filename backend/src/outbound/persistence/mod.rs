//! Redis persistence adapters.
//!
//! - [`RedisPool`]: `bb8` pool shared by every Redis adapter.
//! - [`RedisTripRepository`]: saved trips plus the `trips:all` index.
//! - [`RedisTripAuthenticityRegistry`]: `valid-trip:*` fingerprint records.

mod pool;
mod redis_authenticity_registry;
mod redis_trip_repository;

pub use pool::{PoolError, RedisPool, RedisPoolConfig};
pub use redis_authenticity_registry::RedisTripAuthenticityRegistry;
pub use redis_trip_repository::{RedisTripRepository, TRIP_INDEX_KEY, TRIP_KEY_PREFIX};
