//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The external trip provider failed or returned an unusable response.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// Storage is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "unsupported location: ZZZ")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Trip`].
///
/// A single itinerary offered by the trip provider.
#[derive(ToSchema)]
#[schema(as = crate::domain::Trip)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TripSchema {
    /// Provider-assigned trip identifier.
    #[schema(example = "a749c866-7928-4d08-9d5c-a6821a583d1a")]
    id: String,
    /// IATA code of the departure location.
    #[schema(example = "JFK")]
    origin: String,
    /// IATA code of the arrival location.
    #[schema(example = "LAX")]
    destination: String,
    /// Price of the trip, never negative.
    #[schema(example = 250.0, minimum = 0)]
    cost: f64,
    /// Travel time in hours, never negative.
    #[schema(example = 6.0, minimum = 0)]
    duration: f64,
    /// Transport mode such as `flight`, `train` or `bus`.
    #[schema(rename = "type", example = "flight")]
    transport_type: String,
    /// Human-readable label.
    #[schema(example = "Morning flight")]
    display_name: String,
}
