//! Plain-text rendering of the dashboard tabs.

use std::fmt::Write;

use meteo_core::{
    AnalyticsSummary, CurrentSnapshot, DailyRow, DashboardState, HourlyRow, View,
};

const BAR_WIDTH: usize = 30;

pub fn dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&tabs(state.active_view));
    out.push('\n');

    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }
    if state.loading {
        out.push_str("Loading weather data...\n");
        return out;
    }

    let Some(report) = &state.report else {
        out.push_str("No weather data yet.\n");
        return out;
    };

    match state.active_view {
        View::Overview => out.push_str(&overview(&report.current)),
        View::Hourly => out.push_str(&hourly(&report.hourly)),
        View::Forecast => out.push_str(&forecast(&report.daily)),
        View::Analytics => out.push_str(&analytics(&report.daily)),
    }

    out
}

fn tabs(active: View) -> String {
    View::all()
        .iter()
        .map(|v| {
            if *v == active {
                format!("[{}]", v.title())
            } else {
                format!(" {} ", v.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn overview(current: &CurrentSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", current.city);
    let _ = writeln!(out, "  {}°C  (feels like {}°C)", current.temp_c, current.feels_like_c);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Humidity       {:>6} %", current.humidity_pct);
    let _ = writeln!(
        out,
        "  Wind           {:>6} km/h {}",
        current.wind_speed_kmh,
        compass(current.wind_dir_deg)
    );
    let _ = writeln!(out, "  Pressure       {:>6} hPa", current.pressure_hpa);
    let _ = writeln!(out, "  Precipitation  {:>6} mm", current.precipitation_mm);
    out
}

fn hourly(rows: &[HourlyRow]) -> String {
    let mut out = String::from("24-Hour Forecast\n");
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>9} {:>8} {:>10}",
        "Time", "Temp", "Humidity", "Precip", "Wind"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>6} {:>4}°C {:>8}% {:>7}% {:>5} km/h",
            row.hour_label, row.temp_c, row.humidity_pct, row.precip_prob_pct, row.wind_speed_kmh
        );
    }
    out
}

fn forecast(days: &[DailyRow]) -> String {
    let mut out = String::from("7-Day Forecast\n");
    let max_high = days.iter().map(|d| d.high_c.unsigned_abs()).max().unwrap_or(0);
    for day in days {
        let _ = writeln!(
            out,
            "{:<12} {:>4}°C / {:>4}°C  {}",
            day.date_label,
            day.high_c,
            day.low_c,
            bar(f64::from(day.high_c), f64::from(max_high))
        );
    }
    out
}

fn analytics(days: &[DailyRow]) -> String {
    let mut out = String::new();

    let max_wind = days.iter().map(|d| d.wind_speed_kmh).max().unwrap_or(0);
    out.push_str("Wind Speed (km/h)\n");
    for day in days {
        let _ = writeln!(
            out,
            "{:<12} {:>4}  {}",
            day.date_label,
            day.wind_speed_kmh,
            bar(f64::from(day.wind_speed_kmh), f64::from(max_wind))
        );
    }

    let max_precip = days.iter().map(|d| d.precipitation_mm).fold(0.0, f64::max);
    out.push_str("\nPrecipitation (mm)\n");
    for day in days {
        let _ = writeln!(
            out,
            "{:<12} {:>5.1}  {}",
            day.date_label,
            day.precipitation_mm,
            bar(day.precipitation_mm, max_precip)
        );
    }

    if let Some(summary) = AnalyticsSummary::from_daily(days) {
        out.push('\n');
        let _ = writeln!(out, "Warmest day    {}", summary.warmest_day);
        let _ = writeln!(out, "Windiest day   {}", summary.windiest_day);
        let _ = writeln!(out, "Wettest day    {}", summary.wettest_day);
        let _ = writeln!(out, "Total precip.  {:.1} mm", summary.total_precipitation_mm);
        let _ = writeln!(
            out,
            "Mean high/low  {:.1}°C / {:.1}°C",
            summary.mean_high_c, summary.mean_low_c
        );
    }

    out
}

/// Horizontal bar scaled so that `max` fills `BAR_WIDTH`. Negative values draw nothing.
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

/// 16-point compass direction for a bearing in degrees.
fn compass(deg: i32) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let normalized = f64::from(deg.rem_euclid(360));
    let index = ((normalized / 22.5).round() as usize) % POINTS.len();
    POINTS[index]
}
