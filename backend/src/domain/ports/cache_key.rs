//! Keys addressing entries in a [`super::CacheStore`].
use thiserror::Error;

use crate::domain::LocationCode;

/// Prefix for cached search results.
pub const TRIP_SEARCH_KEY_PREFIX: &str = "trips";

/// Non-empty cache key without surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Validate a raw key.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(CacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Key for the results of a search between two locations.
    ///
    /// The sort order is not part of the key; both orderings share one entry.
    ///
    /// # Examples
    /// ```
    /// use trip_backend::domain::LocationCode;
    /// use trip_backend::domain::ports::CacheKey;
    ///
    /// let origin = LocationCode::new("JFK").expect("origin");
    /// let destination = LocationCode::new("LAX").expect("destination");
    /// let key = CacheKey::trip_search(&origin, &destination);
    /// assert_eq!(key.as_str(), "trips:JFK:LAX");
    /// ```
    pub fn trip_search(origin: &LocationCode, destination: &LocationCode) -> Self {
        Self(format!("{TRIP_SEARCH_KEY_PREFIX}:{origin}:{destination}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("cache key must not be empty")]
    Empty,
    /// Key has leading or trailing whitespace.
    #[error("cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}
