use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Select, Text};
use weather_core::{Config, Units, WeatherError, WeatherReport, service_from_config};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set default units and city interactively.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// "metric" or "imperial"; overrides the configured units.
    #[arg(long)]
    units: Option<Units>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Include hourly samples for each forecast day.
    #[arg(long)]
    hourly: bool,
}

impl OutputArgs {
    fn units(&self, config: &Config) -> Units {
        self.units.unwrap_or_else(|| config.units())
    }

    fn print(&self, result: Result<WeatherReport, WeatherError>) -> anyhow::Result<()> {
        let report = result.map_err(|err| {
            tracing::debug!(?err, "weather request failed");
            anyhow!(err.user_message())
        })?;

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize weather report")?;
            println!("{json}");
        } else {
            print!("{}", output::render(&report, self.hourly));
        }
        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config),
            Command::Show { city, output } => {
                let city = city.or_else(|| config.default_city.clone()).ok_or_else(|| {
                    anyhow!(
                        "No city given and no default city configured.\n\
                         Hint: run `weather configure` or pass a city name."
                    )
                })?;

                let service = service_from_config(&config)?;
                let report = service
                    .fetch_by_city_name(&city, output.units(&config))
                    .await;
                output.print(report)
            }
            Command::Coords {
                latitude,
                longitude,
                output,
            } => {
                let service = service_from_config(&config)?;
                let report = service
                    .fetch_by_coordinates(latitude, longitude, output.units(&config))
                    .await;
                output.print(report)
            }
        }
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let units = Units::all();
    let cursor = units.iter().position(|u| *u == config.units()).unwrap_or(0);
    let chosen = Select::new("Units:", units.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Units selection cancelled")?;

    let current_city = config.default_city.clone().unwrap_or_default();
    let city = Text::new("Default city:")
        .with_default(&current_city)
        .with_help_message("Leave empty to always pass a city explicitly")
        .prompt()
        .context("City prompt cancelled")?;

    config.set_units(chosen);
    config.set_default_city(&city);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
