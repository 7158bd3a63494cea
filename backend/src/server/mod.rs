//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use trip_backend::Trace;
#[cfg(debug_assertions)]
use trip_backend::doc::ApiDoc;
use trip_backend::inbound::http::error::{json_error_handler, query_error_handler};
use trip_backend::inbound::http::health::{HealthState, live, ready};
use trip_backend::inbound::http::state::HttpState;
use trip_backend::inbound::http::trips;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1").configure(trips::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;
    use trip_backend::domain::TRACE_ID_HEADER;

    fn deps() -> AppDependencies {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("valid address");
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&ServerConfig::new(addr)),
        }
    }

    #[actix_web::test]
    async fn search_round_trip_through_full_app() {
        let app = test::init_service(build_app(deps())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/trips/search?origin=JFK&destination=LAX&sort_by=fastest")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = test::read_body_json(res).await;
        let durations: Vec<f64> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|trip| trip["duration"].as_f64())
            .collect();
        let mut sorted = durations.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(durations, sorted);
    }

    #[actix_web::test]
    async fn unsupported_location_returns_bad_request_with_trace_id() {
        let app = test::init_service(build_app(deps())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/trips/search?origin=ZZZ&destination=LAX")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "unsupported_location");
        assert_eq!(body["traceId"].as_str(), header.as_deref());
    }

    #[actix_web::test]
    async fn duplicate_query_parameters_return_error_envelope() {
        let app = test::init_service(build_app(deps())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/trips/search?origin=JFK&origin=LAX&destination=LAX")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "malformed_query");
    }
}
