//! Reshapes a forecast payload into the dashboard view models.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::{CurrentSnapshot, DailyRow, HourlyRow, Location, WeatherReport},
    payload::{CurrentBlock, DailyBlock, ForecastPayload, HourlyBlock},
    provider::ForecastSource,
};

pub const HOURLY_ROWS: usize = 24;
pub const DAILY_ROWS: usize = 7;

/// Nearest integer, ties toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// `None` when the result does not fit an `i32` or `value` is not finite.
pub fn round_half_up(value: f64) -> Option<i32> {
    let rounded = (value + 0.5).floor();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Some(rounded as i32)
    } else {
        None
    }
}

fn rounded(field: &str, value: f64) -> Result<i32> {
    round_half_up(value)
        .ok_or_else(|| WeatherError::malformed(format!("{field} value {value} is out of range")))
}

/// Fetch the forecast for `location` and normalize it in one step.
///
/// Nothing is returned unless every part of the report was built.
pub async fn fetch_and_normalize(
    source: &dyn ForecastSource,
    location: &Location,
) -> Result<WeatherReport> {
    let payload = source.fetch_forecast(location).await?;
    normalize(location, &payload)
}

pub fn normalize(location: &Location, payload: &ForecastPayload) -> Result<WeatherReport> {
    let hourly = hourly_rows(&payload.hourly)?;
    let daily = daily_rows(&payload.daily)?;
    let current = current_snapshot(location, &payload.current)?;

    debug!(
        city = %current.city,
        hourly = hourly.len(),
        daily = daily.len(),
        "normalized forecast"
    );

    Ok(WeatherReport {
        location: location.clone(),
        current,
        hourly,
        daily,
    })
}

fn current_snapshot(location: &Location, current: &CurrentBlock) -> Result<CurrentSnapshot> {
    Ok(CurrentSnapshot {
        city: location.display_name(),
        temp_c: rounded("current.temperature_2m", current.temperature_2m)?,
        feels_like_c: rounded("current.apparent_temperature", current.apparent_temperature)?,
        humidity_pct: rounded("current.relative_humidity_2m", current.relative_humidity_2m)?,
        wind_speed_kmh: rounded("current.wind_speed_10m", current.wind_speed_10m)?,
        wind_dir_deg: rounded("current.wind_direction_10m", current.wind_direction_10m)?,
        pressure_hpa: rounded("current.pressure_msl", current.pressure_msl)?,
        precipitation_mm: current.precipitation,
    })
}

fn hourly_rows(block: &HourlyBlock) -> Result<Vec<HourlyRow>> {
    let temp = ("temperature_2m", block.temperature_2m.as_slice());
    let humidity = ("relative_humidity_2m", block.relative_humidity_2m.as_slice());
    let precip_prob = (
        "precipitation_probability",
        block.precipitation_probability.as_slice(),
    );
    let wind = ("wind_speed_10m", block.wind_speed_10m.as_slice());

    check_series("hourly", &block.time, &[temp, humidity, precip_prob, wind], HOURLY_ROWS)?;

    block
        .time
        .iter()
        .take(HOURLY_ROWS)
        .enumerate()
        .map(|(i, time)| {
            Ok(HourlyRow {
                hour_label: hour_label(time)?,
                temp_c: int_at("hourly", temp, i)?,
                humidity_pct: int_at("hourly", humidity, i)?,
                precip_prob_pct: int_at("hourly", precip_prob, i)?,
                wind_speed_kmh: int_at("hourly", wind, i)?,
            })
        })
        .collect()
}

fn daily_rows(block: &DailyBlock) -> Result<Vec<DailyRow>> {
    let high = ("temperature_2m_max", block.temperature_2m_max.as_slice());
    let low = ("temperature_2m_min", block.temperature_2m_min.as_slice());
    let precip = ("precipitation_sum", block.precipitation_sum.as_slice());
    let wind = ("wind_speed_10m_max", block.wind_speed_10m_max.as_slice());

    check_series("daily", &block.time, &[high, low, precip, wind], DAILY_ROWS)?;

    block
        .time
        .iter()
        .take(DAILY_ROWS)
        .enumerate()
        .map(|(i, date)| {
            Ok(DailyRow {
                date_label: date_label(date)?,
                high_c: int_at("daily", high, i)?,
                low_c: int_at("daily", low, i)?,
                precipitation_mm: value_at("daily", precip, i)?,
                wind_speed_kmh: int_at("daily", wind, i)?,
            })
        })
        .collect()
}

type Series<'a> = (&'static str, &'a [Option<f64>]);

/// Every series must line up with `time`, and there must be at least `needed` points.
fn check_series(block: &str, time: &[String], series: &[Series<'_>], needed: usize) -> Result<()> {
    for (field, values) in series {
        if values.len() != time.len() {
            return Err(WeatherError::malformed(format!(
                "{block}.{field} has {} values, {block}.time has {}",
                values.len(),
                time.len()
            )));
        }
    }

    if time.len() < needed {
        return Err(WeatherError::malformed(format!(
            "{block} series has {} points, expected at least {needed}",
            time.len()
        )));
    }

    Ok(())
}

fn value_at(block: &str, (field, values): Series<'_>, index: usize) -> Result<f64> {
    values
        .get(index)
        .copied()
        .flatten()
        .ok_or_else(|| WeatherError::malformed(format!("{block}.{field}[{index}] is missing")))
}

fn int_at(block: &str, series: Series<'_>, index: usize) -> Result<i32> {
    let value = value_at(block, series, index)?;
    rounded(&format!("{block}.{}[{index}]", series.0), value)
}

/// "2024-01-15T13:00" -> "13:00". The timestamp is already in the location's
/// local time, so the hour is taken as-is.
fn hour_label(timestamp: &str) -> Result<String> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::malformed(format!("bad hourly timestamp '{timestamp}': {e}")))?;

    Ok(format!("{}:00", parsed.hour()))
}

/// "2024-01-15" -> "Mon, Jan 15".
fn date_label(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| WeatherError::malformed(format!("bad daily date '{date}': {e}")))?;

    Ok(parsed.format("%a, %b %-d").to_string())
}
