//! Series extraction from raw Open-Meteo forecast documents
//!
//! Converts the document's parallel `hourly` arrays into a
//! [`ForecastSeries`] of exactly `horizon` points: the first `horizon`
//! index-aligned (time, temperature, humidity) triples, in source order.
//! No reordering, no interpolation, no unit conversion. A response with
//! more points than the horizon is silently truncated; a response with
//! fewer fails rather than shrinking the horizon, which the chart
//! projector relies on.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::DashboardError;
use crate::models::ForecastSeries;
use crate::weather::open_meteo::ForecastResponse;

/// Default forecast horizon: 120 hourly points = 5 days
pub const DEFAULT_HORIZON: usize = 120;

/// Open-Meteo hourly timestamps carry no offset or seconds
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Extract exactly `horizon` forecast points from a raw document
pub fn extract_series(
    response: &ForecastResponse,
    horizon: usize,
) -> crate::Result<ForecastSeries> {
    let hourly = response
        .hourly
        .as_ref()
        .ok_or(DashboardError::MissingField { field: "hourly" })?;

    let times = hourly.time.as_ref().ok_or(DashboardError::MissingField {
        field: "hourly.time",
    })?;
    let temperatures = hourly
        .temperature
        .as_ref()
        .ok_or(DashboardError::MissingField {
            field: "hourly.temperature_2m",
        })?;
    let humidity = hourly
        .relative_humidity
        .as_ref()
        .ok_or(DashboardError::MissingField {
            field: "hourly.relative_humidity_2m",
        })?;

    for sequence in [times.len(), temperatures.len(), humidity.len()] {
        if sequence < horizon {
            return Err(DashboardError::InsufficientData {
                needed: horizon,
                got: sequence,
            });
        }
    }

    let times = times[..horizon]
        .iter()
        .map(|value| parse_timestamp(value))
        .collect::<Result<Vec<_>, _>>()?;

    let series = ForecastSeries {
        times,
        temperatures: temperatures[..horizon].to_vec(),
        humidity: humidity[..horizon].to_vec(),
    };

    log_summary(&series);
    Ok(series)
}

fn parse_timestamp(value: &str) -> crate::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        DashboardError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

/// Diagnostic only, not part of the extraction contract
fn log_summary(series: &ForecastSeries) {
    let (temp_min, temp_max) = min_max(&series.temperatures);
    let (humidity_min, humidity_max) = min_max(&series.humidity);
    debug!(
        "Parsed {} hours of weather data; temperature {:.1}°C to {:.1}°C, humidity {:.1}% to {:.1}%",
        series.len(),
        temp_min,
        temp_max,
        humidity_min,
        humidity_max
    );
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::MAX, f64::MIN), |(min, max), &v| {
        (min.min(v), max.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::open_meteo::HourlyData;
    use rstest::rstest;

    fn document(hours: usize) -> ForecastResponse {
        let time = (0..hours)
            .map(|i| format!("2024-06-{:02}T{:02}:00", 1 + i / 24, i % 24))
            .collect();
        ForecastResponse {
            latitude: 18.5204,
            longitude: 73.8567,
            timezone: Some("Asia/Kolkata".to_string()),
            hourly: Some(HourlyData {
                time: Some(time),
                temperature: Some((0..hours).map(|i| 20.0 + (i % 10) as f64).collect()),
                relative_humidity: Some((0..hours).map(|i| 50.0 + (i % 30) as f64).collect()),
            }),
        }
    }

    #[test]
    fn test_extracts_exactly_horizon_points_index_aligned() {
        let doc = document(168);
        let series = extract_series(&doc, DEFAULT_HORIZON).unwrap();

        assert_eq!(series.len(), DEFAULT_HORIZON);
        assert!(series.is_aligned());

        let hourly = doc.hourly.as_ref().unwrap();
        for (i, point) in series.points().enumerate() {
            assert_eq!(
                point.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
                hourly.time.as_ref().unwrap()[i]
            );
            assert_eq!(
                point.temperature_celsius,
                hourly.temperature.as_ref().unwrap()[i]
            );
            assert_eq!(
                point.relative_humidity_percent,
                hourly.relative_humidity.as_ref().unwrap()[i]
            );
        }
    }

    #[test]
    fn test_timestamps_ascend_in_source_order() {
        let series = extract_series(&document(130), DEFAULT_HORIZON).unwrap();
        assert!(series.times.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    #[case::no_time(|h: &mut HourlyData| h.time = None, "hourly.time")]
    #[case::no_temperature(|h: &mut HourlyData| h.temperature = None, "hourly.temperature_2m")]
    #[case::no_humidity(
        |h: &mut HourlyData| h.relative_humidity = None,
        "hourly.relative_humidity_2m"
    )]
    fn test_missing_array_fails_without_partial_series(
        #[case] strip: fn(&mut HourlyData),
        #[case] expected_field: &'static str,
    ) {
        let mut doc = document(168);
        strip(doc.hourly.as_mut().unwrap());

        let err = extract_series(&doc, DEFAULT_HORIZON).unwrap_err();
        match err {
            DashboardError::MissingField { field } => assert_eq!(field, expected_field),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_hourly_block_fails() {
        let mut doc = document(168);
        doc.hourly = None;
        let err = extract_series(&doc, DEFAULT_HORIZON).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::MissingField { field: "hourly" }
        ));
    }

    #[test]
    fn test_short_time_array_fails_instead_of_truncating_horizon() {
        let mut doc = document(168);
        doc.hourly.as_mut().unwrap().time.as_mut().unwrap().truncate(50);

        let err = extract_series(&doc, DEFAULT_HORIZON).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InsufficientData {
                needed: 120,
                got: 50
            }
        ));
    }

    #[test]
    fn test_longer_response_truncates_to_horizon() {
        // 7-day upstream response, 5-day horizon
        let series = extract_series(&document(168), DEFAULT_HORIZON).unwrap();
        assert_eq!(series.len(), 120);
    }

    #[test]
    fn test_unparseable_timestamp_is_an_error() {
        let mut doc = document(168);
        doc.hourly.as_mut().unwrap().time.as_mut().unwrap()[3] = "not-a-time".to_string();

        let err = extract_series(&doc, DEFAULT_HORIZON).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidTimestamp { .. }));
    }
}
