use std::collections::BTreeMap;
use std::sync::Once;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::chart::{classification_spans, coordinate_at_pixel, elevation_chart};
use crate::classify::{SURFACE, TRAFFIC};
use crate::insert::insert_point;
use crate::metrics::TrackSummary;
use crate::routing::{Format, RouteRequest};
use crate::track::Track;
use crate::weather::{
    gather_forecasts, min_max_weather_value, parse_forecast, weather_sample_points,
    WeatherDatum, WeatherMetric, WeatherPoint, WeatherRequest,
};
use crate::{Config, Coordinate};

static START: Once = Once::new();

/// The browser's handle on the core. Holds only configuration; every call works from the
/// arguments it's given.
#[wasm_bindgen]
pub struct JsTrackAnnotator {
    config: Config,
}

#[derive(Serialize)]
struct WeatherPlan {
    points: Vec<WeatherPoint>,
    urls: Vec<String>,
}

#[derive(Serialize)]
struct WeatherSummary {
    data: Vec<WeatherDatum>,
    // metric -> (min, max), formatted
    extremes: BTreeMap<&'static str, (String, String)>,
}

#[wasm_bindgen]
impl JsTrackAnnotator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsTrackAnnotator {
        START.call_once(|| {
            // Panics shouldn't happen, but if they do, console.log them.
            console_error_panic_hook::set_once();
            if let Err(err) = console_log::init_with_level(log::Level::Info) {
                web_log(&format!("Logging already set up: {err}"));
            }
        });

        Self {
            config: Config::default(),
        }
    }

    /// Replaces the configuration. The caller should recompute anything derived from it.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, input: JsValue) {
        match serde_wasm_bindgen::from_value(input) {
            Ok(config) => {
                self.config = config;
            }
            Err(err) => {
                log::warn!("Bad input to setConfig: {err}");
            }
        }
    }

    #[wasm_bindgen(js_name = insertPoint)]
    pub fn insert_point(&self, route: JsValue, candidate: JsValue) -> Result<JsValue, JsValue> {
        let route: Vec<Coordinate> = serde_wasm_bindgen::from_value(route)?;
        let candidate: Coordinate = serde_wasm_bindgen::from_value(candidate)?;
        let result = insert_point(candidate, &route).map_err(err_to_js)?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    pub fn summarize(&self, raw_geojson: &str) -> Result<String, JsValue> {
        let track = Track::from_geojson_str(raw_geojson).map_err(err_to_js)?;
        serde_json::to_string(&TrackSummary::new(&track)).map_err(err_to_js)
    }

    #[wasm_bindgen(js_name = elevationChart)]
    pub fn elevation_chart(
        &self,
        raw_geojson: &str,
        width: f64,
        height: f64,
    ) -> Result<String, JsValue> {
        let track = Track::from_geojson_str(raw_geojson).map_err(err_to_js)?;
        let points = elevation_chart(&track.samples, track.track_length, width, height);
        serde_json::to_string(&points).map_err(err_to_js)
    }

    /// `kind` is "surface" or "traffic"
    #[wasm_bindgen(js_name = classificationSpans)]
    pub fn classification_spans(
        &self,
        raw_geojson: &str,
        kind: &str,
        width: f64,
    ) -> Result<String, JsValue> {
        let table = match kind {
            "surface" => &SURFACE,
            "traffic" => &TRAFFIC,
            _ => {
                return Err(JsValue::from_str(&format!(
                    "unknown classification {kind:?}"
                )));
            }
        };
        let track = Track::from_geojson_str(raw_geojson).map_err(err_to_js)?;
        let spans = classification_spans(&track.samples, table, track.track_length, width);
        serde_json::to_string(&spans).map_err(err_to_js)
    }

    /// Returns `[lon, lat]`
    #[wasm_bindgen(js_name = coordinateAtPixel)]
    pub fn coordinate_at_pixel(
        &self,
        raw_geojson: &str,
        pixel: f64,
        width: f64,
    ) -> Result<Vec<f64>, JsValue> {
        let track = Track::from_geojson_str(raw_geojson).map_err(err_to_js)?;
        let pt = coordinate_at_pixel(&track.line, pixel, track.track_length, width)
            .map_err(err_to_js)?;
        Ok(vec![pt.x(), pt.y()])
    }

    /// `format` is "geojson" or "gpx"
    #[wasm_bindgen(js_name = routeUrl)]
    pub fn route_url(&self, route: JsValue, format: &str) -> Result<String, JsValue> {
        let format = match format {
            "gpx" => Format::Gpx,
            _ => Format::GeoJson,
        };
        let request = RouteRequest {
            points: serde_wasm_bindgen::from_value(route)?,
            profile: self.config.profile,
            format,
        };
        request.url(&self.config.routing_url).map_err(err_to_js)
    }

    /// One forecast URL per sample point along the track, starting at `start_millis` (epoch ms)
    #[wasm_bindgen(js_name = weatherUrls)]
    pub fn weather_urls(&self, raw_geojson: &str, start_millis: f64) -> Result<String, JsValue> {
        if !start_millis.is_finite() {
            return Err(JsValue::from_str("start time isn't a finite number"));
        }
        let start = DateTime::<Utc>::from_timestamp_millis(start_millis as i64)
            .ok_or_else(|| JsValue::from_str("start time out of range"))?;
        let track = Track::from_geojson_str(raw_geojson).map_err(err_to_js)?;
        let points = weather_sample_points(
            &track.line,
            track.track_length,
            self.config.pace_meters_per_hour,
            start,
        )
        .map_err(err_to_js)?;
        let mut urls = Vec::new();
        for pt in &points {
            let request = WeatherRequest::for_point(pt).map_err(err_to_js)?;
            urls.push(request.url(&self.config.weather_url));
        }
        serde_json::to_string(&WeatherPlan { points, urls }).map_err(err_to_js)
    }

    /// Takes the raw bodies of every forecast in the batch. Fails if any one of them is bad.
    #[wasm_bindgen(js_name = weatherSummary)]
    pub fn weather_summary(&self, bodies: JsValue) -> Result<String, JsValue> {
        let bodies: Vec<String> = serde_wasm_bindgen::from_value(bodies)?;
        let data =
            gather_forecasts(bodies.iter().map(|body| parse_forecast(body))).map_err(err_to_js)?;
        let mut extremes = BTreeMap::new();
        for metric in WeatherMetric::ALL {
            if let Some(pair) = min_max_weather_value(&data, metric) {
                extremes.insert(metric.api_name(), pair);
            }
        }
        serde_json::to_string(&WeatherSummary { data, extremes }).map_err(err_to_js)
    }
}

impl Default for JsTrackAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

fn web_log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

fn err_to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
