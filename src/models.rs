//! Data models for the extracted forecast series
//!
//! The series keeps three parallel, index-aligned vectors rather than a
//! vector of structs: the chart projector treats the equal-length triple as
//! its input contract and checks it before drawing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single hourly forecast sample
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Local wall-clock time as reported by the upstream API (no offset)
    pub timestamp: NaiveDateTime,
    /// Temperature in degrees Celsius
    pub temperature_celsius: f64,
    /// Relative humidity percentage (0-100 in well-formed responses)
    pub relative_humidity_percent: f64,
}

/// Ordered triple of (time, temperature, humidity) sequences used as
/// chart input. Extraction guarantees equal length and ascending order;
/// the chart projector re-checks alignment before drawing.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ForecastSeries {
    pub times: Vec<NaiveDateTime>,
    pub temperatures: Vec<f64>,
    pub humidity: Vec<f64>,
}

impl ForecastSeries {
    /// Number of timestamps in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// True when the three parallel arrays have equal length
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.times.len() == self.temperatures.len() && self.times.len() == self.humidity.len()
    }

    /// The most recent sample (series index 0)
    #[must_use]
    pub fn first(&self) -> Option<ForecastPoint> {
        self.point(0)
    }

    /// Sample at index `i`, if all three arrays reach that far
    #[must_use]
    pub fn point(&self, i: usize) -> Option<ForecastPoint> {
        Some(ForecastPoint {
            timestamp: *self.times.get(i)?,
            temperature_celsius: *self.temperatures.get(i)?,
            relative_humidity_percent: *self.humidity.get(i)?,
        })
    }

    /// Iterate over the index-aligned samples
    pub fn points(&self) -> impl Iterator<Item = ForecastPoint> + '_ {
        self.times
            .iter()
            .zip(&self.temperatures)
            .zip(&self.humidity)
            .map(|((&timestamp, &temperature), &humidity)| ForecastPoint {
                timestamp,
                temperature_celsius: temperature,
                relative_humidity_percent: humidity,
            })
    }
}
