use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    Config,
    error::{Result, WeatherError},
    model::{Location, WeatherReport},
    normalize,
    provider::{ForecastSource, Geocoder, client_from_config},
    state::{DashboardState, DashboardStore},
    view::View,
};

/// Result of one [`Dashboard::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Ok(Arc<WeatherReport>),
    Error { message: String },
}

impl SearchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SearchOutcome::Ok(_))
    }
}

/// Sequences geocoding and forecast fetching and publishes the result into
/// the dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastSource>,
    store: DashboardStore,
}

impl Dashboard {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn ForecastSource>,
        store: DashboardStore,
    ) -> Self {
        Self {
            geocoder,
            forecast,
            store,
        }
    }

    /// Dashboard backed by Open-Meteo, with the configured city, tab and stale policy.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = client_from_config(config)?;
        let store = DashboardStore::new(
            config.default_city.clone(),
            config.default_view,
            config.stale_policy,
        );
        Ok(Self::new(client.clone(), client, store))
    }

    pub fn state(&self) -> DashboardState {
        self.store.snapshot()
    }

    pub fn select_view(&self, view: View) {
        self.store.select_view(view);
    }

    pub async fn resolve(&self, query: &str) -> Result<Location> {
        self.geocoder.resolve(query).await
    }

    pub async fn fetch_and_normalize(&self, location: &Location) -> Result<WeatherReport> {
        normalize::fetch_and_normalize(self.forecast.as_ref(), location).await
    }

    /// Resolve `query`, fetch its weather and publish it.
    ///
    /// Any failure short-circuits and becomes a single user-facing message;
    /// the previously published report is left in place. The outcome reflects
    /// this search even when the stale policy keeps it from being published.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Error {
                message: WeatherError::EmptyQuery.user_message().to_string(),
            };
        }

        let ticket = self.store.begin_search();

        match self.run(query).await {
            Ok(report) => {
                let report = Arc::new(report);
                info!(
                    query,
                    city = %report.current.city,
                    temp_c = report.current.temp_c,
                    "search completed"
                );
                self.store.complete(ticket, Arc::clone(&report));
                SearchOutcome::Ok(report)
            }
            Err(e) => {
                warn!(query, error = %e, "search failed");
                let message = e.user_message().to_string();
                self.store.fail(ticket, message.clone());
                SearchOutcome::Error { message }
            }
        }
    }

    async fn run(&self, query: &str) -> Result<WeatherReport> {
        let location = self.resolve(query).await?;
        self.fetch_and_normalize(&location).await
    }
}
