use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use meteo_core::{AnalyticsSummary, Config, Dashboard, SearchOutcome, StalePolicy, View, WeatherReport};
use std::fmt;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather dashboard in the terminal")]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the configuration file interactively.
    Configure,

    /// Search a city once and print one dashboard view.
    Show {
        /// City name; defaults to `default_city` from the config.
        city: Option<String>,

        /// overview, hourly, forecast or analytics.
        #[arg(long)]
        view: Option<View>,

        /// Print the whole report as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Search and switch tabs in a prompt loop.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, view, json } => show(city, view, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

async fn show(city: Option<String>, view: Option<View>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let dashboard = Dashboard::from_config(&config)?;
    if let Some(view) = view {
        dashboard.select_view(view);
    }

    let city = city.unwrap_or_else(|| config.default_city.clone());

    match dashboard.search(&city).await {
        SearchOutcome::Ok(report) => {
            if json {
                let out = serde_json::to_string_pretty(&json_report(&report))
                    .context("Failed to serialize report to JSON")?;
                println!("{out}");
            } else {
                print!("{}", render::dashboard(&dashboard.state()));
            }
            Ok(())
        }
        SearchOutcome::Error { message } => bail!("{message}"),
    }
}

/// The report plus its 7-day analytics, as printed by `show --json`.
fn json_report(report: &WeatherReport) -> serde_json::Value {
    serde_json::json!({
        "report": report,
        "analytics": AnalyticsSummary::from_daily(&report.daily),
    })
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Search,
    Tab(View),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search city"),
            Action::Tab(view) => write!(f, "Show {}", view.title()),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn actions() -> Vec<Action> {
    let mut actions = vec![Action::Search];
    actions.extend(View::all().iter().copied().map(Action::Tab));
    actions.push(Action::Quit);
    actions
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let dashboard = Dashboard::from_config(&config)?;

    dashboard.search(&config.default_city).await;
    print!("{}", render::dashboard(&dashboard.state()));

    loop {
        let action = match Select::new("What next?", actions()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu selection"),
        };

        match action {
            Action::Search => {
                let query = match Text::new("City:").prompt() {
                    Ok(query) => query,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e).context("Failed to read city name"),
                };
                // Blank input is ignored, like an empty search box.
                if query.trim().is_empty() {
                    continue;
                }
                dashboard.search(&query).await;
            }
            Action::Tab(view) => dashboard.select_view(view),
            Action::Quit => break,
        }

        print!("{}", render::dashboard(&dashboard.state()));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?
        .trim()
        .to_string();

    let views = View::all().to_vec();
    let view_cursor = views.iter().position(|v| *v == config.default_view).unwrap_or(0);
    config.default_view = Select::new("Default view:", views)
        .with_starting_cursor(view_cursor)
        .prompt()
        .context("Failed to read default view")?;

    let policies = StalePolicy::all().to_vec();
    let policy_cursor = policies.iter().position(|p| *p == config.stale_policy).unwrap_or(0);
    config.stale_policy = Select::new("When searches overlap, show:", policies)
        .with_help_message("last-resolved: whichever finishes last; latest-issued: the newest search")
        .with_starting_cursor(policy_cursor)
        .prompt()
        .context("Failed to read stale policy")?;

    config.endpoints.geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.endpoints.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    config.endpoints.forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.endpoints.forecast_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    config.validate()?;
    // Fail before saving if an endpoint doesn't parse.
    Dashboard::from_config(&config)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_view() {
        let cli = Cli::try_parse_from(["meteo", "show", "Paris", "--view", "Hourly"])
            .expect("valid args");

        match cli.command {
            Command::Show { city, view, json } => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert_eq!(view, Some(View::Hourly));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn json_output_carries_report_and_analytics() {
        use meteo_core::{CurrentSnapshot, DailyRow, Location};

        let report = WeatherReport {
            location: Location {
                latitude: 48.85,
                longitude: 2.35,
                name: "Paris".into(),
                country: "France".into(),
            },
            current: CurrentSnapshot {
                city: "Paris, France".into(),
                temp_c: 18,
                feels_like_c: 17,
                humidity_pct: 60,
                wind_speed_kmh: 8,
                wind_dir_deg: 90,
                pressure_hpa: 1018,
                precipitation_mm: 0.0,
            },
            hourly: Vec::new(),
            daily: vec![
                DailyRow {
                    date_label: "Wed, May 1".into(),
                    high_c: 21,
                    low_c: 12,
                    precipitation_mm: 0.0,
                    wind_speed_kmh: 15,
                },
                DailyRow {
                    date_label: "Thu, May 2".into(),
                    high_c: 19,
                    low_c: 10,
                    precipitation_mm: 4.5,
                    wind_speed_kmh: 25,
                },
            ],
        };

        let value = json_report(&report);

        assert_eq!(value["report"]["current"]["city"], "Paris, France");
        assert_eq!(value["report"]["daily"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["analytics"]["warmest_day"], "Wed, May 1");
        assert_eq!(value["analytics"]["wettest_day"], "Thu, May 2");
        assert_eq!(value["analytics"]["total_precipitation_mm"], 4.5);
    }

    #[test]
    fn json_output_without_daily_rows_has_null_analytics() {
        use meteo_core::{CurrentSnapshot, Location};

        let report = WeatherReport {
            location: Location {
                latitude: 0.0,
                longitude: 0.0,
                name: "Null Island".into(),
                country: String::new(),
            },
            current: CurrentSnapshot {
                city: "Null Island".into(),
                temp_c: 26,
                feels_like_c: 28,
                humidity_pct: 80,
                wind_speed_kmh: 12,
                wind_dir_deg: 135,
                pressure_hpa: 1010,
                precipitation_mm: 0.0,
            },
            hourly: Vec::new(),
            daily: Vec::new(),
        };

        assert!(json_report(&report)["analytics"].is_null());
    }

    #[test]
    fn rejects_unknown_view() {
        let err = Cli::try_parse_from(["meteo", "show", "--view", "radar"]).unwrap_err();
        assert!(err.to_string().contains("Unknown view"));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["meteo", "interactive", "-v"]).expect("valid args");
        assert!(cli.verbose);
    }

    #[test]
    fn menu_lists_search_tabs_then_quit() {
        let labels: Vec<String> = actions().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            [
                "Search city",
                "Show Overview",
                "Show Hourly",
                "Show Forecast",
                "Show Analytics",
                "Quit"
            ]
        );
    }
}
