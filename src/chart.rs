//! Chart projection: forecast series → dual-axis PNG
//!
//! Renders temperature (left Y axis) and humidity (right Y axis) against a
//! shared time X axis. Every call draws into its own local buffer, so
//! concurrent renders from the web server cannot bleed axis or style state
//! into each other. Input alignment is checked before any drawing call to
//! avoid producing a partially rendered image.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::debug;

use crate::error::DashboardError;
use crate::models::ForecastSeries;

/// Matplotlib default-palette blue, kept for visual parity
const TEMPERATURE_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Matplotlib default-palette green
const HUMIDITY_COLOR: RGBColor = RGBColor(44, 160, 44);
const GRID_COLOR: RGBColor = RGBColor(204, 204, 204);

const MARKER_SIZE: i32 = 3;

/// Upper bound on either chart dimension, also enforced by config
/// validation; a 8000x8000 RGB buffer is already 192 MB
pub const MAX_DIMENSION: u32 = 8_000;

/// Render the series into an in-memory PNG
pub fn render_chart(
    series: &ForecastSeries,
    city: &str,
    width: u32,
    height: u32,
) -> crate::Result<Vec<u8>> {
    validate(series)?;

    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(DashboardError::Render {
            message: format!(
                "unsupported chart dimensions {width}x{height} (limit {MAX_DIMENSION})"
            ),
        });
    }

    // usize arithmetic: the pixel count can exceed u32 range
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    draw(&mut buffer, width, height, series, city)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&buffer, width, height, ExtendedColorType::Rgb8)
        .map_err(DashboardError::render)?;

    debug!(
        "Rendered {}x{} chart for {} ({} points, {} bytes)",
        width,
        height,
        city,
        series.len(),
        png.len()
    );
    Ok(png)
}

/// All input checks happen here, before a single drawing call
fn validate(series: &ForecastSeries) -> crate::Result<()> {
    if !series.is_aligned() {
        return Err(DashboardError::DataMismatch {
            times: series.times.len(),
            temperatures: series.temperatures.len(),
            humidity: series.humidity.len(),
        });
    }
    // A single point cannot be projected as a line
    if series.len() < 2 {
        return Err(DashboardError::InsufficientData {
            needed: 2,
            got: series.len(),
        });
    }
    Ok(())
}

fn draw(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    series: &ForecastSeries,
    city: &str,
) -> crate::Result<()> {
    let n = series.len();
    let (temp_min, temp_max) = padded_range(&series.temperatures);
    let (humidity_min, humidity_max) = padded_range(&series.humidity);

    let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(DashboardError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("5-Day Weather Forecast for {city}, Maharashtra"),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0..n - 1, temp_min..temp_max)
        .map_err(DashboardError::render)?
        .set_secondary_coord(0..n - 1, humidity_min..humidity_max);

    let times = &series.times;
    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Temperature (°C)")
        .x_labels(12.min(n))
        .x_label_formatter(&|i| {
            times
                .get(*i)
                .map(|t| t.format("%d %b %H:%M").to_string())
                .unwrap_or_default()
        })
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(("sans-serif", 13).into_font().color(&TEMPERATURE_COLOR))
        .light_line_style(GRID_COLOR.mix(0.4))
        .bold_line_style(GRID_COLOR)
        .draw()
        .map_err(DashboardError::render)?;

    chart
        .configure_secondary_axes()
        .y_desc("Humidity (%)")
        .label_style(("sans-serif", 13).into_font().color(&HUMIDITY_COLOR))
        .draw()
        .map_err(DashboardError::render)?;

    chart
        .draw_series(LineSeries::new(
            series.temperatures.iter().enumerate().map(|(i, &t)| (i, t)),
            TEMPERATURE_COLOR.stroke_width(2),
        ))
        .map_err(DashboardError::render)?
        .label("Temperature")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 18, y)], TEMPERATURE_COLOR.stroke_width(2))
        });

    // Circle markers for temperature
    chart
        .draw_series(series.temperatures.iter().enumerate().map(|(i, &t)| {
            EmptyElement::at((i, t)) + Circle::new((0, 0), MARKER_SIZE, TEMPERATURE_COLOR.filled())
        }))
        .map_err(DashboardError::render)?;

    chart
        .draw_secondary_series(LineSeries::new(
            series.humidity.iter().enumerate().map(|(i, &h)| (i, h)),
            HUMIDITY_COLOR.stroke_width(2),
        ))
        .map_err(DashboardError::render)?
        .label("Humidity")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 18, y)], HUMIDITY_COLOR.stroke_width(2))
        });

    // Square markers keep humidity separable from temperature
    chart
        .draw_secondary_series(series.humidity.iter().enumerate().map(|(i, &h)| {
            EmptyElement::at((i, h))
                + Rectangle::new(
                    [
                        (-MARKER_SIZE, -MARKER_SIZE),
                        (MARKER_SIZE, MARKER_SIZE),
                    ],
                    HUMIDITY_COLOR.filled(),
                )
        }))
        .map_err(DashboardError::render)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(GRID_COLOR)
        .draw()
        .map_err(DashboardError::render)?;

    root.present().map_err(DashboardError::render)?;
    Ok(())
}

/// Y range with 10% headroom so the series never touches the frame.
/// Degenerates gracefully for constant series.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values.iter().fold((f64::MAX, f64::MIN), |(min, max), &v| {
        (min.min(v), max.max(v))
    });
    let padding = ((max - min) * 0.1).max(1.0);
    (min - padding, max + padding)
}
