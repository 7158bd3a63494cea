//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use trip_backend::inbound::http::health::HealthState;
use trip_backend::outbound::persistence::{RedisPool, RedisPoolConfig};
use trip_backend::outbound::trip_api::TripApiHttpSource;
use trip_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

fn load_settings<I>(args: I) -> io::Result<AppSettings>
where
    I: IntoIterator<Item = OsString>,
{
    AppSettings::load_from_iter(args.into_iter().collect::<Vec<_>>())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))
}

async fn build_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let mut config = ServerConfig::new(bind_addr)
        .with_cache_ttl(settings.cache_ttl())
        .with_authenticity_ttl(settings.authenticity_ttl());

    if let Some(redis_url) = settings.redis_url.as_deref() {
        let pool = RedisPool::new(RedisPoolConfig::new(redis_url))
            .await
            .map_err(io::Error::other)?;
        config = config.with_redis_pool(pool);
    }

    if let Some((endpoint, api_key)) = settings.trip_api() {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let source = TripApiHttpSource::new(endpoint, api_key, settings.upstream_timeout())
            .map_err(io::Error::other)?;
        config = config.with_trip_source(Arc::new(source));
    }

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let config = build_config(&settings).await?;
    info!(bind_addr = %config.bind_addr(), "starting trip search server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

#[cfg(test)]
mod tests {
    //! Start-up wiring from settings.

    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "TRIPS_BIND_ADDR",
        "TRIPS_REDIS_URL",
        "TRIPS_TRIP_API_URL",
        "TRIPS_TRIP_API_KEY",
    ];

    #[rstest]
    #[actix_web::test]
    async fn settings_without_backends_build_a_memory_config() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings =
            load_settings([OsString::from("trip-backend")]).expect("settings should load");
        let config = build_config(&settings).await.expect("config should build");

        assert_eq!(config.bind_addr(), settings.bind_addr().expect("default parses"));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_provider_url_is_rejected() {
        let _guard = lock_env([
            ("TRIPS_BIND_ADDR", None),
            ("TRIPS_REDIS_URL", None),
            ("TRIPS_TRIP_API_URL", Some("not a url".to_owned())),
            ("TRIPS_TRIP_API_KEY", Some("secret".to_owned())),
        ]);

        let settings =
            load_settings([OsString::from("trip-backend")]).expect("settings should load");
        let err = build_config(&settings)
            .await
            .err()
            .expect("invalid url should fail");

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
