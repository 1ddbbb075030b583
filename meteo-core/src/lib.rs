//! Core library for the `meteo` weather dashboard.
//!
//! This crate defines:
//! - Geocoding of a city name and fetching of its forecast (Open-Meteo)
//! - Normalization of the forecast into flat per-row view models
//! - The search orchestration and its atomically replaced dashboard state
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod state;
pub mod view;

pub use config::{Config, Endpoints};
pub use dashboard::{Dashboard, SearchOutcome};
pub use error::WeatherError;
pub use model::{CurrentSnapshot, DailyRow, HourlyRow, Location, WeatherReport};
pub use provider::{ForecastSource, Geocoder, open_meteo::OpenMeteoClient};
pub use state::{DashboardState, DashboardStore, StalePolicy};
pub use view::{AnalyticsSummary, View};
