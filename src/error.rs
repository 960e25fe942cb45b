//! Error types for the weatherboard application

use thiserror::Error;

/// Main error type for the weatherboard application
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Requested location is not in the static location table
    #[error("unknown location '{name}': not in the location table")]
    UnknownLocation { name: String },

    /// Upstream fetch could not complete (transport or decode failure)
    #[error("weather API request failed: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Expected field absent from the forecast document
    #[error("forecast response is missing field '{field}'")]
    MissingField { field: &'static str },

    /// A source sequence is shorter than the requested horizon
    #[error("insufficient forecast data: needed {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Parallel series arrays differ in length
    #[error(
        "forecast series arrays differ in length: {times} times, \
         {temperatures} temperatures, {humidity} humidity values"
    )]
    DataMismatch {
        times: usize,
        temperatures: usize,
        humidity: usize,
    },

    /// A timestamp string in the forecast document did not parse
    #[error("invalid timestamp in forecast response: '{value}'")]
    InvalidTimestamp { value: String },

    /// Chart drawing or PNG encoding failed
    #[error("chart rendering failed: {message}")]
    Render { message: String },
}

impl DashboardError {
    /// Create an unknown-location error
    pub fn unknown_location<S: Into<String>>(name: S) -> Self {
        Self::UnknownLocation { name: name.into() }
    }

    /// Create a rendering error from any displayable drawing failure
    pub fn render<E: std::fmt::Display>(error: E) -> Self {
        Self::Render {
            message: error.to_string(),
        }
    }
}
