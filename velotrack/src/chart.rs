use geo::{LineString, Point};
use serde::Serialize;

use crate::classify::{Category, ClassificationTable, UNKNOWN_COLOR};
use crate::geometry::point_at_distance;
use crate::metrics::{max_elevation, min_elevation};
use crate::track::TrackSample;
use crate::weather::{WeatherDatum, WeatherMetric, WeatherPoint};
use crate::Result;

/// Linear interpolation of `value` from one range into another. A degenerate input range gives
/// NaN; callers draw flat data themselves instead of scaling it.
pub fn scale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return f64::NAN;
    }
    ((value - in_min) * (out_max - out_min)) / (in_max - in_min) + out_min
}

/// x-axis: meters along the track to a pixel offset. A zero-length track sits at pixel 0.
pub fn distance_to_pixel(distance: f64, track_length: f64, width: f64) -> f64 {
    if track_length == 0.0 {
        return 0.0;
    }
    scale(distance, 0.0, track_length, 0.0, width)
}

/// The inverse of `distance_to_pixel`. A zero-width canvas maps back to the start.
pub fn pixel_offset_to_distance(pixel: f64, track_length: f64, width: f64) -> f64 {
    if width == 0.0 {
        return 0.0;
    }
    scale(pixel, 0.0, width, 0.0, track_length)
}

/// Resolves a hovered or clicked pixel to a position on the map.
pub fn coordinate_at_pixel(
    line: &LineString,
    pixel: f64,
    track_length: f64,
    width: f64,
) -> Result<Point> {
    point_at_distance(line, pixel_offset_to_distance(pixel, track_length, width))
}

/// The first sample at or past `distance`, or the last sample beyond the end.
pub fn sample_at_distance(samples: &[TrackSample], distance: f64) -> Option<&TrackSample> {
    samples
        .iter()
        .find(|x| x.distance_from_start >= distance)
        .or_else(|| samples.last())
}

#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

// Larger values draw higher, so y runs from height to 0. Flat data goes through the middle.
fn value_to_pixel(value: f64, min: f64, max: f64, height: f64) -> f64 {
    if min == max {
        return height / 2.0;
    }
    scale(value, min, max, height, 0.0)
}

pub fn elevation_chart(
    samples: &[TrackSample],
    track_length: f64,
    width: f64,
    height: f64,
) -> Vec<ChartPoint> {
    let min = min_elevation(samples);
    let max = max_elevation(samples);
    samples
        .iter()
        .map(|sample| ChartPoint {
            x: distance_to_pixel(sample.distance_from_start, track_length, width),
            y: value_to_pixel(sample.elevation, min, max, height),
        })
        .collect()
}

/// `points` and `data` pair up by index
pub fn weather_chart(
    points: &[WeatherPoint],
    data: &[WeatherDatum],
    metric: WeatherMetric,
    track_length: f64,
    width: f64,
    height: f64,
) -> Vec<ChartPoint> {
    let values: Vec<f64> = data.iter().map(|x| x.value(metric)).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    points
        .iter()
        .zip(values)
        .map(|(pt, value)| ChartPoint {
            x: distance_to_pixel(pt.distance, track_length, width),
            y: value_to_pixel(value, min, max, height),
        })
        .collect()
}

/// A horizontal run of the surface or traffic bar
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ColorSpan {
    pub start_x: f64,
    pub end_x: f64,
    /// None when the tag is missing or not in the table
    pub category: Option<Category>,
    pub color: &'static str,
}

/// Each sample covers the pixels between the previous sample's distance and its own. Adjacent
/// samples in the same category merge into one span.
pub fn classification_spans(
    samples: &[TrackSample],
    table: &ClassificationTable,
    track_length: f64,
    width: f64,
) -> Vec<ColorSpan> {
    let mut spans: Vec<ColorSpan> = Vec::new();
    let mut prev_distance = 0.0;
    for sample in samples {
        let start_x = distance_to_pixel(prev_distance, track_length, width);
        let end_x = distance_to_pixel(sample.distance_from_start, track_length, width);
        prev_distance = sample.distance_from_start;

        let category = table.classify(&sample.way_tags);
        match spans.last_mut() {
            Some(last) if last.category == category => {
                last.end_x = end_x;
            }
            _ => spans.push(ColorSpan {
                start_x,
                end_x,
                category,
                color: category.map_or(UNKNOWN_COLOR, |x| x.color),
            }),
        }
    }
    spans
}
