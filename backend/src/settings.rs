//! Server settings loaded via OrthoConfig.
//!
//! Every value can be supplied through `TRIPS_*` environment variables, CLI
//! flags or a configuration file. Unset values fall back to the defaults
//! exposed by the accessor methods.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Lifetime of cached search results when none is configured.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
/// Request timeout for the trip provider when none is configured.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;

/// Configuration for the trip search server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRIPS")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// Redis connection URL. In-memory adapters are used when unset.
    pub redis_url: Option<String>,
    /// Trip provider endpoint. The fixture source is used when unset.
    pub trip_api_url: Option<String>,
    /// API key sent to the trip provider in the `x-api-key` header.
    pub trip_api_key: Option<String>,
    /// Lifetime of cached search results in seconds.
    pub cache_ttl_seconds: Option<u64>,
    /// Lifetime of authenticity fingerprints in seconds. Unset keeps them
    /// forever.
    pub authenticity_ttl_seconds: Option<u64>,
    /// Trip provider request timeout in seconds.
    pub upstream_timeout_seconds: Option<u64>,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache_ttl_seconds
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        )
    }

    pub fn authenticity_ttl(&self) -> Option<Duration> {
        self.authenticity_ttl_seconds.map(Duration::from_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(
            self.upstream_timeout_seconds
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECONDS),
        )
    }

    /// Provider endpoint and key, present only when both are configured.
    pub fn trip_api(&self) -> Option<(&str, &str)> {
        match (self.trip_api_url.as_deref(), self.trip_api_key.as_deref()) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Some((url, key))
            }
            _ => None,
        }
    }
}
