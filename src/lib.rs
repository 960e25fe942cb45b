//! Weatherboard - Maharashtra weather dashboard
//!
//! Fetches 5-day hourly forecasts from the Open-Meteo API for a fixed
//! table of district coordinates and renders dual-axis
//! temperature/humidity charts, served over a small web API or written to
//! a file from the CLI.

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod locations;
pub mod models;
pub mod series;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::WeatherboardConfig;
pub use error::DashboardError;
pub use locations::{Location, LocationTable};
pub use models::{ForecastPoint, ForecastSeries};
pub use weather::{ForecastProvider, OpenMeteoClient};

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
