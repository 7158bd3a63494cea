//! In-process adapters.
//!
//! Used when no Redis URL is configured and as real (non-mock) doubles in
//! behaviour tests. State is lost on restart and not shared between processes.

mod authenticity_registry;
mod cache_store;
mod trip_repository;

pub use authenticity_registry::InMemoryTripAuthenticityRegistry;
pub use cache_store::InMemoryCacheStore;
pub use trip_repository::InMemoryTripRepository;
