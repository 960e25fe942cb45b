//! Weather API client for Open-Meteo integration
//!
//! One GET per forecast request, no retries and no caching. The
//! [`ForecastProvider`] trait is the seam between the request handlers and
//! the network so the web path can be exercised with a stubbed upstream.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::locations::Location;

/// Source of raw forecast documents for a location
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch_forecast(
        &self,
        location: &Location,
    ) -> crate::Result<open_meteo::ForecastResponse>;
}

/// HTTP client for the Open-Meteo forecast API
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    forecast_days: u8,
}

impl OpenMeteoClient {
    /// Create a new client with the configured timeout
    pub fn new(config: &WeatherConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weatherboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            forecast_days: config.forecast_days,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(city = %location.name))]
    async fn fetch_forecast(
        &self,
        location: &Location,
    ) -> crate::Result<open_meteo::ForecastResponse> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m,relative_humidity_2m&timezone=auto&forecast_days={}",
            self.base_url, location.latitude, location.longitude, self.forecast_days
        );

        info!(
            "Fetching weather data for {} ({})",
            location.name,
            location.format_coordinates()
        );
        debug!("Open-Meteo request URL: {}", url);

        let start = Instant::now();
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let forecast: open_meteo::ForecastResponse = response.json().await?;
        let elapsed = start.elapsed();

        info!(
            "Weather data fetched for {} in {:.3}s",
            location.name,
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow Open-Meteo response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(forecast)
    }
}

/// Open-Meteo API response structures
pub mod open_meteo {
    use serde::Deserialize;

    /// Forecast response from the Open-Meteo API
    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub latitude: f64,
        #[serde(default)]
        pub longitude: f64,
        pub timezone: Option<String>,
        pub hourly: Option<HourlyData>,
    }

    /// Hourly weather arrays from Open-Meteo. All three are optional so an
    /// incomplete upstream document deserializes and surfaces as a typed
    /// extraction error rather than a decode failure.
    #[derive(Debug, Clone, Deserialize)]
    pub struct HourlyData {
        pub time: Option<Vec<String>>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<Vec<f64>>,
        #[serde(rename = "relative_humidity_2m")]
        pub relative_humidity: Option<Vec<f64>>,
    }
}
