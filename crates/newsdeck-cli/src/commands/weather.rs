//! Weather command implementation.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use newsdeck_core::{Config, Fetcher, ResponseCache, Subscription, Units, WeatherStation};
use std::sync::Arc;

use crate::output::{OutputFormat, print_json};

/// Execute the weather command: current conditions for a location.
pub async fn execute(
    location: Option<String>,
    units: Option<Units>,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load()?;
    if config.keys.weather.is_empty() {
        bail!(
            "no weather API key configured; set NEWSDECK_WEATHER_API_KEY or add it to {}",
            Config::config_path()?.display()
        );
    }

    let location = location.unwrap_or_else(|| config.defaults.location.clone());
    let units = units.unwrap_or(config.defaults.units);

    let cache = ResponseCache::new();
    let fetcher = Arc::new(Fetcher::new()?);
    let station = WeatherStation::new(
        Subscription::new(cache, fetcher),
        &config.keys.weather,
        units,
    );
    station.observe(&location);
    let report = station
        .report()
        .await
        .with_context(|| format!("fetching weather for '{location}'"))?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            let condition = report.condition().unwrap_or("Unknown");
            println!(
                "{}  {}{}  {}",
                report.name.bold(),
                report.main.temp,
                units.symbol(),
                condition.bright_blue()
            );
            Ok(())
        },
    }
}
