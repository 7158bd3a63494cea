//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`TripSchema`]) that describe domain types without coupling them to
//! utoipa. The document backs Swagger UI in debug builds and the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TripSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trip search API",
        description = "Search trips through the external provider and manage saved trips."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::trips::search_trips,
        crate::inbound::http::trips::save_trip,
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::get_trip,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(TripSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "trips", description = "Trip search and saved trips"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
