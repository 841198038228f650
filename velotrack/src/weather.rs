use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use geo::{LineString, Point};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::geometry::point_at_distance;
use crate::{Error, Result};

/// Where and when the rider is expected to be, for one forecast lookup
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct WeatherPoint {
    /// Meters along the track
    pub distance: f64,
    pub lon: f64,
    pub lat: f64,
    pub arrival: DateTime<Utc>,
}

/// Upper bound on forecast lookups for one track
pub const MAX_WEATHER_POINTS: usize = 500;

/// One point per `pace` meters (rounding up). Point `i` sits `(i + 1) * pace` meters along the
/// line, clamped to its end, and is reached `i + 1` hours after `start_time`.
pub fn weather_sample_points(
    line: &LineString,
    track_length: f64,
    pace_meters_per_hour: f64,
    start_time: DateTime<Utc>,
) -> Result<Vec<WeatherPoint>> {
    if !(track_length > 0.0 && pace_meters_per_hour > 0.0) {
        return Ok(Vec::new());
    }

    let count = (track_length / pace_meters_per_hour).ceil();
    if count.is_nan() || count > MAX_WEATHER_POINTS as f64 {
        return Err(Error::Weather(format!(
            "a pace of {pace_meters_per_hour} m/h needs {count} forecasts for {track_length} m, \
             more than {MAX_WEATHER_POINTS}"
        )));
    }
    let count = count as usize;
    let mut points = Vec::with_capacity(count);
    for idx in 0..count {
        let hours = idx as i64 + 1;
        let distance = (hours as f64 * pace_meters_per_hour).min(track_length);
        let pt = point_at_distance(line, distance)?;
        points.push(WeatherPoint {
            distance,
            lon: pt.x(),
            lat: pt.y(),
            arrival: start_time + TimeDelta::hours(hours),
        });
    }
    Ok(points)
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum WeatherMetric {
    Temp,
    WindSpeed,
    WindDirection,
    PrecipMm,
    PrecipPercentage,
    CloudCover,
}

impl WeatherMetric {
    pub const ALL: [WeatherMetric; 6] = [
        WeatherMetric::Temp,
        WeatherMetric::WindSpeed,
        WeatherMetric::WindDirection,
        WeatherMetric::PrecipMm,
        WeatherMetric::PrecipPercentage,
        WeatherMetric::CloudCover,
    ];

    /// The Open-Meteo hourly variable
    pub fn api_name(self) -> &'static str {
        match self {
            WeatherMetric::Temp => "temperature_2m",
            WeatherMetric::WindSpeed => "wind_speed_10m",
            WeatherMetric::WindDirection => "wind_direction_10m",
            WeatherMetric::PrecipMm => "precipitation",
            WeatherMetric::PrecipPercentage => "precipitation_probability",
            WeatherMetric::CloudCover => "cloud_cover",
        }
    }
}

/// One forecast request, for the hour containing the arrival time
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub hour: DateTime<Utc>,
}

impl WeatherRequest {
    pub fn at(point: Point, arrival: DateTime<Utc>) -> Result<Self> {
        let hour = arrival
            .duration_trunc(TimeDelta::hours(1))
            .map_err(|err| Error::Weather(err.to_string()))?;
        Ok(Self {
            latitude: point.y(),
            longitude: point.x(),
            hour,
        })
    }

    pub fn for_point(pt: &WeatherPoint) -> Result<Self> {
        Self::at(Point::new(pt.lon, pt.lat), pt.arrival)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let hour = self.hour.format("%Y-%m-%dT%H:00").to_string();
        let hourly: Vec<&str> = WeatherMetric::ALL.iter().map(|x| x.api_name()).collect();
        vec![
            ("latitude", format!("{:.5}", self.latitude)),
            ("longitude", format!("{:.5}", self.longitude)),
            ("hourly", hourly.join(",")),
            ("start_hour", hour.clone()),
            ("end_hour", hour),
            ("timezone", "GMT".to_string()),
        ]
    }

    pub fn url(&self, base: &str) -> String {
        join_url(base, &self.query_pairs())
    }
}

/// Values are form-encoded whole, so separators inside them (`,` `|`) can't split parameters.
pub(crate) fn join_url(base: &str, pairs: &[(&'static str, String)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{base}?{query}")
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WeatherValues {
    pub temp: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precip_mm: f64,
    pub precip_percentage: f64,
    pub cloud_cover: f64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFormatted {
    pub temp: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub precip_mm: String,
    pub precip_percentage: String,
    pub cloud_cover: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct WeatherDatum {
    pub values: WeatherValues,
    pub formatted: WeatherFormatted,
}

impl WeatherDatum {
    pub fn value(&self, metric: WeatherMetric) -> f64 {
        let v = &self.values;
        match metric {
            WeatherMetric::Temp => v.temp,
            WeatherMetric::WindSpeed => v.wind_speed,
            WeatherMetric::WindDirection => v.wind_direction,
            WeatherMetric::PrecipMm => v.precip_mm,
            WeatherMetric::PrecipPercentage => v.precip_percentage,
            WeatherMetric::CloudCover => v.cloud_cover,
        }
    }

    pub fn formatted(&self, metric: WeatherMetric) -> &str {
        let f = &self.formatted;
        match metric {
            WeatherMetric::Temp => &f.temp,
            WeatherMetric::WindSpeed => &f.wind_speed,
            WeatherMetric::WindDirection => &f.wind_direction,
            WeatherMetric::PrecipMm => &f.precip_mm,
            WeatherMetric::PrecipPercentage => &f.precip_percentage,
            WeatherMetric::CloudCover => &f.cloud_cover,
        }
    }
}

#[derive(Deserialize)]
struct Forecast {
    hourly_units: ForecastUnits,
    hourly: ForecastHourly,
}

#[derive(Deserialize)]
struct ForecastUnits {
    temperature_2m: String,
    wind_speed_10m: String,
    wind_direction_10m: String,
    precipitation: String,
    precipitation_probability: String,
    cloud_cover: String,
}

#[derive(Deserialize)]
struct ForecastHourly {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    wind_direction_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
}

/// Reads the first hourly entry of an Open-Meteo forecast.
pub fn parse_forecast(body: &str) -> Result<WeatherDatum> {
    let forecast: Forecast = serde_json::from_str(body)?;
    let hourly = &forecast.hourly;
    let units = &forecast.hourly_units;

    let values = WeatherValues {
        temp: first_hour("temperature_2m", &hourly.temperature_2m)?,
        wind_speed: first_hour("wind_speed_10m", &hourly.wind_speed_10m)?,
        wind_direction: first_hour("wind_direction_10m", &hourly.wind_direction_10m)?,
        precip_mm: first_hour("precipitation", &hourly.precipitation)?,
        precip_percentage: first_hour(
            "precipitation_probability",
            &hourly.precipitation_probability,
        )?,
        cloud_cover: first_hour("cloud_cover", &hourly.cloud_cover)?,
    };
    let formatted = WeatherFormatted {
        temp: format_value(values.temp, &units.temperature_2m),
        wind_speed: format_value(values.wind_speed, &units.wind_speed_10m),
        wind_direction: format_value(values.wind_direction, &units.wind_direction_10m),
        precip_mm: format_value(values.precip_mm, &units.precipitation),
        precip_percentage: format_value(
            values.precip_percentage,
            &units.precipitation_probability,
        ),
        cloud_cover: format_value(values.cloud_cover, &units.cloud_cover),
    };
    Ok(WeatherDatum { values, formatted })
}

fn first_hour(name: &str, series: &[Option<f64>]) -> Result<f64> {
    series
        .first()
        .copied()
        .flatten()
        .ok_or_else(|| Error::Weather(format!("no value for {name} in the first hour")))
}

fn format_value(value: f64, unit: &str) -> String {
    format!("{value}{unit}")
}

/// All forecasts or nothing: charts only show weather when every point came back.
pub fn gather_forecasts<I>(results: I) -> Result<Vec<WeatherDatum>>
where
    I: IntoIterator<Item = Result<WeatherDatum>>,
{
    let mut data = Vec::new();
    let mut failed = 0;
    let mut total = 0;
    for (idx, result) in results.into_iter().enumerate() {
        total += 1;
        match result {
            Ok(datum) => data.push(datum),
            Err(err) => {
                log::warn!("Weather forecast for point {idx} failed: {err}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(Error::WeatherBatch { failed, total });
    }
    Ok(data)
}

/// The formatted minimum and maximum of one metric. The first extreme wins ties.
pub fn min_max_weather_value(
    data: &[WeatherDatum],
    metric: WeatherMetric,
) -> Option<(String, String)> {
    let mut min = data.first()?;
    let mut max = min;
    for datum in &data[1..] {
        if datum.value(metric) < min.value(metric) {
            min = datum;
        }
        if datum.value(metric) > max.value(metric) {
            max = datum;
        }
    }
    Some((
        min.formatted(metric).to_string(),
        max.formatted(metric).to_string(),
    ))
}
