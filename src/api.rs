//! HTTP API for the dashboard frontend
//!
//! One query endpoint drives the whole flow: resolve the city, fetch the
//! forecast, extract the series, render the chart, and wrap the result in
//! a uniform JSON payload. Every failure is caught at this boundary and
//! reported in the payload; the HTTP status is always 200.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart;
use crate::config::ChartConfig;
use crate::error::DashboardError;
use crate::locations::LocationTable;
use crate::series;
use crate::weather::ForecastProvider;

/// City used when the request does not name one
pub const DEFAULT_CITY: &str = "Mumbai";

/// Shared request-handling state, injected at router construction
#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<LocationTable>,
    pub provider: Arc<dyn ForecastProvider>,
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// Current conditions formatted for display (taken from series index 0)
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: String,
    pub humidity: String,
}

/// Uniform response payload; failures are signaled here, not via status
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WeatherPayload {
    Success {
        success: bool,
        plot: String,
        city: String,
        current: CurrentConditions,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl WeatherPayload {
    fn failure(error: &DashboardError) -> Self {
        Self::Failure {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Build the API router over the injected state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get_weather", get(get_weather))
        .route("/locations", get(get_locations))
        .with_state(state)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherPayload> {
    let city = query.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    match fetch_and_render(&state, &city).await {
        Ok(payload) => Json(payload),
        Err(err) => {
            warn!("Weather request for '{}' failed: {}", city, err);
            Json(WeatherPayload::failure(&err))
        }
    }
}

async fn get_locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.locations.names().map(str::to_string).collect())
}

/// One fetch → one extraction → one render, no caching between requests
async fn fetch_and_render(
    state: &AppState,
    city: &str,
) -> crate::Result<WeatherPayload> {
    let location = state.locations.resolve(city)?;
    let document = state.provider.fetch_forecast(location).await?;
    let series = series::extract_series(&document, state.chart.horizon_hours)?;
    let png = chart::render_chart(&series, city, state.chart.width, state.chart.height)?;

    let current = series
        .first()
        .ok_or(DashboardError::InsufficientData { needed: 1, got: 0 })?;

    info!(
        "Rendered forecast chart for {}: currently {:.1}°C, {:.1}%",
        city, current.temperature_celsius, current.relative_humidity_percent
    );

    Ok(WeatherPayload::Success {
        success: true,
        plot: STANDARD.encode(&png),
        city: city.to_string(),
        current: CurrentConditions {
            temperature: format!("{:.1}°C", current.temperature_celsius),
            humidity: format!("{:.1}%", current.relative_humidity_percent),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload_shape() {
        let payload = WeatherPayload::Success {
            success: true,
            plot: "aGVsbG8=".to_string(),
            city: "Pune".to_string(),
            current: CurrentConditions {
                temperature: "25.0°C".to_string(),
                humidity: "60.0%".to_string(),
            },
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["city"], "Pune");
        assert_eq!(value["current"]["temperature"], "25.0°C");
        assert_eq!(value["current"]["humidity"], "60.0%");
    }

    #[test]
    fn test_failure_payload_shape() {
        let payload = WeatherPayload::failure(&DashboardError::unknown_location("Atlantis"));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["success"], false);
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .contains("unknown location")
        );
    }
}
