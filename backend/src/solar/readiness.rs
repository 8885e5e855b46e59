//! Imagery readiness probe.
//!
//! The results page only shows the rooftop tile once the static map for the
//! building centre can actually be fetched. The probe polls that URL until a
//! success status arrives or the attempt budget runs out.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::config::SolarConfig;
use super::error::{ErrorContext, SolarApiError, SolarResult};
use super::google::map_reqwest_error;
use super::ReadinessCheck;
use crate::models::Coordinates;

#[derive(Debug, Clone)]
pub struct ImageryReadinessProbe {
    client: reqwest::Client,
    url_template: String,
    key: String,
    attempts: u32,
    delay: Duration,
}

impl ImageryReadinessProbe {
    pub fn new(config: &SolarConfig) -> SolarResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SolarApiError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url_template: config.imagery_url_template.clone(),
            key: config.imagery_key.clone(),
            attempts: config.readiness_attempts.max(1),
            delay: config.readiness_delay,
        })
    }

    /// Imagery URL for `center`. A configured imagery key wins over the
    /// tenant key.
    pub fn imagery_url(&self, center: Coordinates, tenant_key: &str) -> String {
        let key = if self.key.is_empty() { tenant_key } else { self.key.as_str() };
        imagery_url(&self.url_template, center, key)
    }
}

/// Fill the `{lat}`, `{lng}` and `{key}` placeholders of an imagery URL.
pub fn imagery_url(template: &str, center: Coordinates, key: &str) -> String {
    template
        .replace("{lat}", &center.latitude.to_string())
        .replace("{lng}", &center.longitude.to_string())
        .replace("{key}", key)
}

#[async_trait]
impl ReadinessCheck for ImageryReadinessProbe {
    async fn wait_until_ready(&self, center: Coordinates, api_key: &str) -> SolarResult<()> {
        let url = self.imagery_url(center, api_key);
        let context = ErrorContext::new("wait_until_ready").with_coordinates(center);

        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Imagery ready at {} after {} attempt(s)", center, attempt);
                    return Ok(());
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    let err = SolarApiError::status(status, body, context.clone());
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    last_error = Some(err);
                }
                Err(e) => last_error = Some(map_reqwest_error(e, context.clone())),
            }

            if attempt < self.attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no response".to_string());
        warn!("Imagery not ready at {}: {}", center, detail);
        Err(SolarApiError::timeout(
            format!("imagery not ready after {} attempts", self.attempts),
            context.with_details(detail),
        ))
    }
}
