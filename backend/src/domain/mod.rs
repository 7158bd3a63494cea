//! Domain primitives, ports and services.
//!
//! Purpose: define the trip model, the search and saved-trip use cases, and
//! the ports through which they reach caches, the trip provider and storage.
//! Nothing here depends on Actix, Redis or reqwest.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Trip / TripPayload / TripDraft: validated trip and its unvalidated input.
//! - LocationCode / SortBy / TripSearchRequest: search parameters.
//! - TripFingerprint: SHA-256 authenticity fingerprint.
//! - TripSearchService / SavedTripsService: driving port implementations.

pub mod authenticity;
pub mod error;
pub mod location;
pub mod ports;
pub mod saved_trips_service;
pub mod search;
pub mod trace_id;
pub mod trip;
pub mod trip_search_service;

pub use self::authenticity::{AUTHENTICITY_KEY_PREFIX, TripFingerprint};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::location::{
    LOCATION_CODE_LEN, LocationCode, LocationCodeValidationError, SUPPORTED_LOCATIONS,
};
pub use self::saved_trips_service::SavedTripsService;
pub use self::search::{SortBy, SortByParseError, TripSearchRequest, TripSearchValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::trip::{
    Trip, TripDraft, TripFieldIssue, TripId, TripIdValidationError, TripPayload,
    TripValidationError,
};
pub use self::trip_search_service::TripSearchService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use trip_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such trip"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
