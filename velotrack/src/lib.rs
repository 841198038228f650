//! Inserts anchor points into bike routes, and turns BRouter responses into the series behind the
//! elevation, surface, traffic and weather charts. Everything here is a pure function of its
//! input; the caller does all fetching.

use serde::Deserialize;

pub use velotrack_model::{BrouterResponse, Coordinate, TrackMessage};

pub use self::error::{Error, MessageFault, Result};

pub mod chart;
pub mod classify;
mod error;
pub mod geometry;
pub mod insert;
#[cfg(target_arch = "wasm32")]
mod js;
pub mod metrics;
pub mod routing;
pub mod tags;
pub mod track;
pub mod weather;

#[cfg(test)]
mod tests;

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct Config {
    /// Assumed riding speed, used to space weather lookups one hour apart
    pub pace_meters_per_hour: f64,
    pub profile: routing::Profile,
    pub routing_url: String,
    pub weather_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pace_meters_per_hour: 15_000.0,
            profile: routing::Profile::Trekking,
            routing_url: "https://brouter.de/brouter".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}
