//! Trip search and saved-trip HTTP handlers.
//!
//! ```text
//! GET    /api/v1/trips/search?origin=JFK&destination=LAX&sort_by=fastest
//! POST   /api/v1/trips
//! GET    /api/v1/trips
//! GET    /api/v1/trips/{id}
//! DELETE /api/v1/trips/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Trip, TripPayload, TripSearchRequest, TripSearchValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TripSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DESTINATION, ORIGIN, empty_id_error, map_search_validation_error, missing_field_error,
};

/// Query parameters for a trip search.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TripSearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// `fastest` or `cheapest`; `sortBy` is accepted as an alias.
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
}

/// Path parameters addressing one saved trip.
#[derive(Debug, Deserialize)]
pub struct TripPath {
    pub id: String,
}

fn parse_search_params(params: TripSearchParams) -> Result<TripSearchRequest, Error> {
    let origin = params.origin.ok_or_else(|| missing_field_error(ORIGIN))?;
    let destination = params
        .destination
        .ok_or_else(|| missing_field_error(DESTINATION))?;
    TripSearchRequest::parse(&origin, &destination, params.sort_by.as_deref()).map_err(|err| {
        let raw = match &err {
            TripSearchValidationError::Origin(_) => origin.as_str(),
            TripSearchValidationError::Destination(_) => destination.as_str(),
            TripSearchValidationError::SortBy(_) => params.sort_by.as_deref().unwrap_or_default(),
        };
        map_search_validation_error(err, raw)
    })
}

fn require_id(path: TripPath) -> Result<String, Error> {
    if path.id.trim().is_empty() {
        return Err(empty_id_error());
    }
    Ok(path.id)
}

fn trip_not_found(id: &str) -> Error {
    Error::not_found(format!("trip {id} not found"))
        .with_details(serde_json::json!({ "id": id, "code": "trip_not_found" }))
}

/// Register the trip handlers. The search route is added before the
/// `{id}` routes so `/trips/search` never resolves as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_trips)
        .service(save_trip)
        .service(list_trips)
        .service(get_trip)
        .service(delete_trip);
}

/// Search the provider for trips between two supported locations.
#[utoipa::path(
    get,
    path = "/api/v1/trips/search",
    params(
        ("origin" = String, Query, description = "IATA code of the departure location"),
        ("destination" = String, Query, description = "IATA code of the arrival location"),
        ("sort_by" = Option<String>, Query, description = "fastest or cheapest (default)")
    ),
    responses(
        (status = 200, description = "Matching trips in the requested order", body = [TripSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Trip provider failure", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "searchTrips"
)]
#[get("/trips/search")]
pub async fn search_trips(
    state: web::Data<HttpState>,
    query: web::Query<TripSearchParams>,
) -> ApiResult<web::Json<Vec<Trip>>> {
    let request = parse_search_params(query.into_inner())?;
    let trips = state.trip_search.search(&request).await?;
    Ok(web::Json(trips))
}

/// Save a trip previously returned by a search.
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    request_body = TripSchema,
    responses(
        (status = 201, description = "Trip saved", body = TripSchema),
        (status = 400, description = "Invalid or unknown trip", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "saveTrip"
)]
#[post("/trips")]
pub async fn save_trip(
    state: web::Data<HttpState>,
    payload: web::Json<TripPayload>,
) -> ApiResult<HttpResponse> {
    let trip = state.saved_trips.save(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(trip))
}

/// List every saved trip.
#[utoipa::path(
    get,
    path = "/api/v1/trips",
    responses(
        (status = 200, description = "Saved trips", body = [TripSchema]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Trip>>> {
    let trips = state.saved_trips_query.list().await?;
    Ok(web::Json(trips))
}

/// Fetch one saved trip.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Saved trip", body = TripSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getTrip"
)]
#[get("/trips/{id}")]
pub async fn get_trip(
    state: web::Data<HttpState>,
    path: web::Path<TripPath>,
) -> ApiResult<web::Json<Trip>> {
    let id = require_id(path.into_inner())?;
    state
        .saved_trips_query
        .get(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| trip_not_found(&id))
}

/// Delete a saved trip.
#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(
    state: web::Data<HttpState>,
    path: web::Path<TripPath>,
) -> ApiResult<HttpResponse> {
    let id = require_id(path.into_inner())?;
    if state.saved_trips.delete(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(trip_not_found(&id))
    }
}

#[cfg(test)]
#[path = "trips_tests.rs"]
mod tests;
