use crate::{
    Config,
    error::Result,
    model::Location,
    payload::ForecastPayload,
    provider::open_meteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// Resolves a free-text place name to the single best matching location.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `query` must already be trimmed and non-empty.
    async fn resolve(&self, query: &str) -> Result<Location>;
}

/// Fetches current, hourly and daily weather for a location in one round trip.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastPayload>;
}

/// Construct the Open-Meteo client from the configured endpoints.
///
/// The same client serves as both geocoder and forecast source.
pub fn client_from_config(config: &Config) -> anyhow::Result<Arc<OpenMeteoClient>> {
    let client = OpenMeteoClient::new(&config.endpoints)?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;

    #[test]
    fn client_from_default_config() {
        let cfg = Config::default();
        let client = client_from_config(&cfg).expect("default endpoints are valid");
        assert_eq!(client.endpoints(), &Endpoints::default());
    }

    #[test]
    fn client_from_config_rejects_bad_url() {
        let mut cfg = Config::default();
        cfg.endpoints.forecast_url = "not a url".into();

        let err = client_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid forecast endpoint"));
    }
}
