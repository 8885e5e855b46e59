//! Building lookup against the Google Solar API.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::config::SolarConfig;
use super::error::{ErrorContext, SolarApiError, SolarResult};
use super::BuildingLookup;
use crate::models::{BuildingInsights, Coordinates};

const FIND_CLOSEST_PATH: &str = "/v1/buildingInsights:findClosest";

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// HTTP client for `buildingInsights:findClosest`.
#[derive(Debug, Clone)]
pub struct GoogleSolarClient {
    client: reqwest::Client,
    base_url: String,
    required_quality: String,
}

impl GoogleSolarClient {
    pub fn new(config: &SolarConfig) -> SolarResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SolarApiError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            required_quality: config.required_quality.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, FIND_CLOSEST_PATH)
    }
}

#[async_trait]
impl BuildingLookup for GoogleSolarClient {
    async fn find_building(
        &self,
        coordinates: Coordinates,
        api_key: &str,
    ) -> SolarResult<Option<BuildingInsights>> {
        let context = ErrorContext::new("find_building").with_coordinates(coordinates);
        debug!("Requesting building insights at {}", coordinates);

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("location.latitude", coordinates.latitude.to_string()),
                ("location.longitude", coordinates.longitude.to_string()),
                ("requiredQuality", self.required_quality.clone()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, context.clone()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, context.clone()))?;

        interpret_response(status, &body, context)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error, context: ErrorContext) -> SolarApiError {
    if err.is_timeout() {
        SolarApiError::timeout(err.to_string(), context)
    } else if err.is_decode() {
        SolarApiError::decode(err.to_string(), context)
    } else {
        SolarApiError::transport(err.to_string(), context)
    }
}

/// Map a raw `findClosest` response onto the lookup contract.
///
/// A 404, or an error envelope with status `NOT_FOUND`, means the location is
/// not covered and resolves to `Ok(None)`.
pub fn interpret_response(
    status: u16,
    body: &str,
    context: ErrorContext,
) -> SolarResult<Option<BuildingInsights>> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<BuildingInsights>(body)
            .map(Some)
            .map_err(|e| SolarApiError::decode(e.to_string(), context));
    }

    let envelope = serde_json::from_str::<GoogleErrorEnvelope>(body).ok();
    let not_found = status == 404
        || envelope
            .as_ref()
            .map(|e| e.error.status == "NOT_FOUND")
            .unwrap_or(false);
    if not_found {
        debug!("No building found {}", context);
        return Ok(None);
    }

    let message = envelope
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    Err(SolarApiError::status(status, message, context))
}
