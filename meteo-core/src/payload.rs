//! Wire shapes of the Open-Meteo geocoding and forecast endpoints.
//!
//! Forecast series are parallel arrays indexed by position. Values are kept as
//! `Option<f64>` because the API emits `null` for hours it has no data for;
//! [`crate::normalize`] decides which nulls matter.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    /// Absent when nothing matched.
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    pub current: CurrentBlock,
    pub hourly: HourlyBlock,
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub pressure_msl: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Field lists requested from the forecast endpoint, in request order.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m,wind_direction_10m,pressure_msl";
pub const HOURLY_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation_probability,wind_speed_10m";
pub const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";
