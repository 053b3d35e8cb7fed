//! Place Lookup Service HTTP client
//!
//! `GET {base}/v1/places/{id}?key={api_key}&fields={f1,f2}`
//!
//! Success body: `{ "formattedAddress": "...", "id": "..." }` (both optional).
//! Error body: `{ "error": { "code": 404, "message": "...", "status": "NOT_FOUND" } }`.
//! An error body whose status is `OK` on a 2xx response is read as success.
//! A body that is not valid JSON is a parse error whatever the HTTP status.

use super::{LookupOutcome, LookupStatus, PlaceDetails, PlaceField, PlaceLookup};
use crate::error::PlaceError;
use async_trait::async_trait;
use moneymate_common::config::PlaceApiConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("moneymate-payees/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    #[serde(rename = "formattedAddress")]
    formatted_address: Option<String>,
    id: Option<String>,
    error: Option<PlaceErrorBody>,
}

#[derive(Debug, Deserialize)]
struct PlaceErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    status: String,
}

/// HTTP client for the Place Lookup Service
pub struct PlacesClient {
    http_client: Client,
    base_uri: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(
        base_uri: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, PlaceError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| PlaceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_uri: base_uri.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from TOML settings plus an already-resolved API key
    pub fn from_config(config: &PlaceApiConfig, api_key: String) -> Result<Self, PlaceError> {
        Self::new(
            config.base_uri.clone(),
            api_key,
            config.request_timeout(),
            config.connect_timeout(),
        )
    }

    fn place_url(&self, place_id: &str) -> String {
        format!(
            "{}/v1/places/{}",
            self.base_uri.trim_end_matches('/'),
            place_id
        )
    }
}

#[async_trait]
impl PlaceLookup for PlacesClient {
    async fn lookup(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> Result<LookupOutcome, PlaceError> {
        let url = self.place_url(place_id);
        let fields_param = fields
            .iter()
            .map(PlaceField::api_name)
            .collect::<Vec<_>>()
            .join(",");

        debug!(place_id = %place_id, fields = %fields_param, "Querying Place Lookup Service");

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("fields", fields_param.as_str())])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        let parsed: PlaceDetailsResponse = serde_json::from_str(&body).map_err(|e| {
            PlaceError::Parse(format!(
                "Failed to parse place details response (HTTP {}): {}",
                status, e
            ))
        })?;

        let error = parsed
            .error
            .filter(|e| !(status.is_success() && e.status == "OK"));

        if let Some(error) = error {
            debug!(
                place_id = %place_id,
                http_status = status.as_u16(),
                status = %error.status,
                "Place Lookup Service returned an error body"
            );
            return Ok(LookupOutcome::Error {
                status_code: u16::try_from(error.code).unwrap_or(status.as_u16()),
                status: LookupStatus::parse(&error.status),
                message: error.message,
            });
        }

        if !status.is_success() {
            return Err(PlaceError::Api(status.as_u16(), body));
        }

        Ok(LookupOutcome::Found(PlaceDetails {
            id: parsed.id.unwrap_or_default(),
            formatted_address: parsed.formatted_address.unwrap_or_default(),
        }))
    }
}

fn request_error(e: reqwest::Error) -> PlaceError {
    if e.is_timeout() {
        PlaceError::Timeout(e.to_string())
    } else {
        PlaceError::Network(e.to_string())
    }
}
