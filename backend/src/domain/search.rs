//! Search request parsing and result ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::location::{LocationCode, LocationCodeValidationError};
use super::trip::Trip;

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Ascending by duration.
    Fastest,
    /// Ascending by cost.
    #[default]
    Cheapest,
}

impl SortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Cheapest => "cheapest",
        }
    }

    /// Sort trips in place. Ties keep their input order.
    pub fn apply(self, trips: &mut [Trip]) {
        match self {
            Self::Fastest => trips.sort_by(|a, b| a.duration().total_cmp(&b.duration())),
            Self::Cheapest => trips.sort_by(|a, b| a.cost().total_cmp(&b.cost())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a sort key is neither `fastest` nor `cheapest`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sort_by must be one of fastest, cheapest (got `{value}`)")]
pub struct SortByParseError {
    value: String,
}

impl FromStr for SortBy {
    type Err = SortByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fastest" => Ok(Self::Fastest),
            "cheapest" => Ok(Self::Cheapest),
            other => Err(SortByParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation failures for [`TripSearchRequest::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripSearchValidationError {
    #[error("invalid origin: {0}")]
    Origin(LocationCodeValidationError),
    #[error("invalid destination: {0}")]
    Destination(LocationCodeValidationError),
    #[error(transparent)]
    SortBy(#[from] SortByParseError),
}

impl TripSearchValidationError {
    /// Name of the query parameter that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Origin(_) => "origin",
            Self::Destination(_) => "destination",
            Self::SortBy(_) => "sort_by",
        }
    }
}

/// Validated search parameters.
///
/// # Examples
/// ```
/// use trip_backend::domain::{SortBy, TripSearchRequest};
///
/// let request = TripSearchRequest::parse("jfk", "LAX", Some("fastest")).expect("valid");
/// assert_eq!(request.origin.as_str(), "JFK");
/// assert_eq!(request.sort_by, SortBy::Fastest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSearchRequest {
    pub origin: LocationCode,
    pub destination: LocationCode,
    pub sort_by: SortBy,
}

impl TripSearchRequest {
    pub fn new(origin: LocationCode, destination: LocationCode, sort_by: SortBy) -> Self {
        Self {
            origin,
            destination,
            sort_by,
        }
    }

    /// Parse raw query values. A missing sort key defaults to cheapest.
    pub fn parse(
        origin: &str,
        destination: &str,
        sort_by: Option<&str>,
    ) -> Result<Self, TripSearchValidationError> {
        let origin = LocationCode::new(origin).map_err(TripSearchValidationError::Origin)?;
        let destination =
            LocationCode::new(destination).map_err(TripSearchValidationError::Destination)?;
        let sort_by = sort_by.map(str::parse::<SortBy>).transpose()?.unwrap_or_default();
        Ok(Self::new(origin, destination, sort_by))
    }
}
