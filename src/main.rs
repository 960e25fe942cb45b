use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use weatherboard::api::{AppState, DEFAULT_CITY};
use weatherboard::{
    ForecastProvider, LocationTable, OpenMeteoClient, WeatherboardConfig, chart, series, web,
};

#[derive(Parser)]
#[command(
    name = "weatherboard",
    version,
    about = "Maharashtra weather dashboard - 5-day temperature/humidity forecast charts"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard web server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch one forecast and write the chart to a PNG file
    Plot {
        /// District to fetch, from the built-in location table
        #[arg(long, default_value = DEFAULT_CITY)]
        city: String,
        /// Output PNG path
        #[arg(long, default_value = "forecast.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = WeatherboardConfig::load(cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let locations = Arc::new(LocationTable::maharashtra());
    let provider: Arc<dyn ForecastProvider> = Arc::new(OpenMeteoClient::new(&config.weather)?);

    match cli.command {
        Command::Serve { port } => {
            let state = AppState {
                locations,
                provider,
                chart: config.chart.clone(),
            };
            web::run(state, port.unwrap_or(config.server.port)).await
        }
        Command::Plot { city, out } => plot(&locations, provider.as_ref(), &config, &city, &out).await,
    }
}

async fn plot(
    locations: &LocationTable,
    provider: &dyn ForecastProvider,
    config: &WeatherboardConfig,
    city: &str,
    out: &PathBuf,
) -> Result<()> {
    print_location_table(locations, city);

    let location = locations.resolve(city)?;
    let document = provider.fetch_forecast(location).await?;
    let forecast = series::extract_series(&document, config.chart.horizon_hours)?;
    let png = chart::render_chart(&forecast, city, config.chart.width, config.chart.height)?;

    std::fs::write(out, &png).with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "Wrote {}-point forecast chart for {} to {}",
        forecast.len(),
        city,
        out.display()
    );
    Ok(())
}

fn print_location_table(table: &LocationTable, selected: &str) {
    println!("Maharashtra Weather Dashboard - 5-Day Forecast");
    println!("{}", "=".repeat(50));
    println!("\nAvailable Districts:");

    let names: Vec<&str> = table.names().collect();
    for row in names.chunks(3) {
        let line: String = row.iter().map(|name| format!("{name:<15}")).collect();
        println!("{line}");
    }

    println!("\nSelected district: {selected}");
    println!("{}", "-".repeat(50));
}
