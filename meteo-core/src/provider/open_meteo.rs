use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Endpoints,
    error::{Result, WeatherError},
    model::Location,
    payload::{CURRENT_FIELDS, DAILY_FIELDS, ForecastPayload, GeocodingResponse, HOURLY_FIELDS},
};

use super::{ForecastSource, Geocoder};

/// HTTP client for the keyless Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    endpoints: Endpoints,
    geocoding_url: Url,
    forecast_url: Url,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(endpoints: &Endpoints) -> anyhow::Result<Self> {
        let geocoding_url = Url::parse(&endpoints.geocoding_url).with_context(|| {
            format!("Invalid geocoding endpoint '{}'", endpoints.geocoding_url)
        })?;
        let forecast_url = Url::parse(&endpoints.forecast_url)
            .with_context(|| format!("Invalid forecast endpoint '{}'", endpoints.forecast_url))?;

        Ok(Self {
            endpoints: endpoints.clone(),
            geocoding_url,
            forecast_url,
            http: Client::new(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        debug!(%url, ?query, "requesting {}", what);

        let res = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::network(format!("Failed to send {what} request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::network(format!("Failed to read {what} response body: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::network(format!(
                "{what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(format!("Failed to parse {what} JSON: {e}")))
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn resolve(&self, query: &str) -> Result<Location> {
        let parsed: GeocodingResponse = self
            .get_json(
                &self.geocoding_url,
                &[("name", query.to_string()), ("count", "1".to_string())],
                "geocoding",
            )
            .await?;

        let best = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        let location = Location {
            latitude: best.latitude,
            longitude: best.longitude,
            name: best.name,
            country: best.country.unwrap_or_default(),
        };

        debug!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query,
            location.display_name(),
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastPayload> {
        self.get_json(
            &self.forecast_url,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ],
            "forecast",
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
