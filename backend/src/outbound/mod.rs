//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: Redis connection pool, saved-trip repository and
//!   authenticity registry
//! - **cache**: Redis-backed search result cache
//! - **trip_api**: reqwest client for the external trip provider
//! - **memory**: in-process stand-ins used when Redis is not configured
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod memory;
pub mod persistence;
pub mod trip_api;
