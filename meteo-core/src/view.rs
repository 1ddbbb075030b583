use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::model::DailyRow;

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Overview,
    Hourly,
    Forecast,
    Analytics,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Hourly => "hourly",
            View::Forecast => "forecast",
            View::Analytics => "analytics",
        }
    }

    /// Tab caption, e.g. "Overview".
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Hourly => "Hourly",
            View::Forecast => "Forecast",
            View::Analytics => "Analytics",
        }
    }

    pub const fn all() -> &'static [View] {
        &[View::Overview, View::Hourly, View::Forecast, View::Analytics]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        View::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown view '{value}'. Supported views: overview, hourly, forecast, analytics."
                )
            })
    }
}

/// Highlights of the 7-day outlook shown on the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    /// Label of the day with the highest maximum temperature.
    pub warmest_day: String,
    pub windiest_day: String,
    pub wettest_day: String,
    pub total_precipitation_mm: f64,
    pub mean_high_c: f64,
    pub mean_low_c: f64,
}

impl AnalyticsSummary {
    /// `None` for an empty outlook. Ties pick the earliest day.
    pub fn from_daily(days: &[DailyRow]) -> Option<Self> {
        let first = days.first()?;

        let mut warmest = first;
        let mut windiest = first;
        let mut wettest = first;
        for day in &days[1..] {
            if day.high_c > warmest.high_c {
                warmest = day;
            }
            if day.wind_speed_kmh > windiest.wind_speed_kmh {
                windiest = day;
            }
            if day.precipitation_mm > wettest.precipitation_mm {
                wettest = day;
            }
        }

        let count = days.len() as f64;
        let total_precipitation_mm = days.iter().map(|d| d.precipitation_mm).sum();
        let mean_high_c = days.iter().map(|d| f64::from(d.high_c)).sum::<f64>() / count;
        let mean_low_c = days.iter().map(|d| f64::from(d.low_c)).sum::<f64>() / count;

        Some(Self {
            warmest_day: warmest.date_label.clone(),
            windiest_day: windiest.date_label.clone(),
            wettest_day: wettest.date_label.clone(),
            total_precipitation_mm,
            mean_high_c,
            mean_low_c,
        })
    }
}
