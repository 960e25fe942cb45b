//! Configuration for the weatherboard application
//!
//! Loads settings from an optional TOML file plus `WEATHERBOARD_`-prefixed
//! environment variable overrides, with serde-level defaults for every
//! field and validation of the combined result.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherboardConfig {
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Chart rendering settings
    #[serde(default)]
    pub chart: ChartConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo forecast API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (the only timeout in the fetch path)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Days of hourly data to request upstream
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
    /// Number of hourly points to extract and render
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u8 {
    7
}

fn default_port() -> u16 {
    5000
}

fn default_chart_width() -> u32 {
    1200
}

fn default_chart_height() -> u32 {
    600
}

fn default_horizon_hours() -> usize {
    crate::series::DEFAULT_HORIZON
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            horizon_hours: default_horizon_hours(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl WeatherboardConfig {
    /// Load configuration from an optional file path and the environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(
                File::from(path)
                    .required(true)
                    .format(config::FileFormat::Toml),
            );
        } else {
            builder = builder.add_source(
                File::with_name("weatherboard")
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHERBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the combined configuration
    pub fn validate(&self) -> Result<()> {
        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            bail!("weather.base_url must be an HTTP or HTTPS URL");
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            bail!("weather.timeout_seconds must be between 1 and 300");
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > 16 {
            bail!("weather.forecast_days must be between 1 and 16 (Open-Meteo limit)");
        }

        // The horizon must fit into the requested upstream window
        let available_hours = usize::from(self.weather.forecast_days) * 24;
        if self.chart.horizon_hours < 2 || self.chart.horizon_hours > available_hours {
            bail!(
                "chart.horizon_hours must be between 2 and {available_hours} \
                 (forecast_days * 24)"
            );
        }

        if self.chart.width < 200 || self.chart.height < 100 {
            bail!("chart dimensions are too small to render a readable chart");
        }

        let max = crate::chart::MAX_DIMENSION;
        if self.chart.width > max || self.chart.height > max {
            bail!("chart dimensions cannot exceed {max} pixels");
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WeatherboardConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.chart.horizon_hours, 120);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(WeatherboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = WeatherboardConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_horizon_beyond_upstream_window() {
        let mut config = WeatherboardConfig::default();
        config.weather.forecast_days = 3;
        config.chart.horizon_hours = 120; // 3 days only provide 72
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_chart_dimensions() {
        let mut config = WeatherboardConfig::default();
        config.chart.width = 40_000;
        config.chart.height = 40_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let mut config = WeatherboardConfig::default();
        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }
}
