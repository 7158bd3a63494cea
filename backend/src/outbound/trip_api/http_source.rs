//! Reqwest-backed trip provider adapter.
//!
//! This adapter owns transport details only: query construction, the API key
//! header, timeout and HTTP error mapping, and JSON decoding into domain trips.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::TripListDto;
use crate::domain::ports::{TripSource, TripSourceError};
use crate::domain::{LocationCode, Trip};

const API_KEY_HEADER: &str = "x-api-key";

/// Trip source performing `GET {endpoint}?origin=..&destination=..`.
pub struct TripApiHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl TripApiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl TripSource for TripApiHttpSource {
    async fn search_candidates(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<Vec<Trip>, TripSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_trips(body.as_ref(), origin, destination)
    }

    fn is_location_supported(&self, code: &LocationCode) -> bool {
        code.is_supported()
    }
}

fn parse_trips(
    body: &[u8],
    origin: &LocationCode,
    destination: &LocationCode,
) -> Result<Vec<Trip>, TripSourceError> {
    let list: TripListDto = serde_json::from_slice(body).map_err(|error| {
        TripSourceError::decode(format!("expected a JSON array of trips: {error}"))
    })?;
    let decoded = list.into_matching_trips(origin, destination);
    if decoded.rejected > 0 {
        warn!(
            %origin,
            %destination,
            rejected = decoded.rejected,
            "dropped provider trips failing validation"
        );
    }
    debug!(%origin, %destination, count = decoded.trips.len(), "fetched provider trips");
    Ok(decoded.trips)
}

fn map_transport_error(error: reqwest::Error) -> TripSourceError {
    if error.is_timeout() {
        TripSourceError::timeout(error.to_string())
    } else {
        TripSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TripSourceError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TripSourceError::timeout(format!("status {}: {preview}", status.as_u16()))
        }
        _ => TripSourceError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
