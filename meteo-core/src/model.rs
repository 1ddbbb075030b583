use serde::{Deserialize, Serialize};

/// A geocoded place, produced once per search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: String,
}

impl Location {
    /// "London, United Kingdom", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    pub city: String,
    pub temp_c: i32,
    pub feels_like_c: i32,
    pub humidity_pct: i32,
    pub wind_speed_kmh: i32,
    pub wind_dir_deg: i32,
    pub pressure_hpa: i32,
    pub precipitation_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRow {
    /// Local hour of day, e.g. "0:00" or "13:00".
    pub hour_label: String,
    pub temp_c: i32,
    pub humidity_pct: i32,
    pub precip_prob_pct: i32,
    pub wind_speed_kmh: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    /// e.g. "Mon, Jan 15".
    pub date_label: String,
    pub high_c: i32,
    pub low_c: i32,
    pub precipitation_mm: f64,
    pub wind_speed_kmh: i32,
}

/// Everything one successful search produces.
///
/// The three view models always come from the same forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentSnapshot,
    pub hourly: Vec<HourlyRow>,
    pub daily: Vec<DailyRow>,
}
