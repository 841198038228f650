use std::fmt;

use geo::LineString;
use geojson::de::deserialize_geometry;
use serde::{Deserialize, Serialize};

/// One anchor point of a route, as exchanged with the UI: `[lon, lat, label, direct]`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    pub label: Option<String>,
    /// Route to this point in a straight line, ignoring the routing engine's cost model
    pub direct: bool,
}

type RawCoordinate = (f64, f64, Option<String>, bool);

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            label: None,
            direct: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    pub fn to_point(&self) -> geo::Point {
        geo::Point::new(self.lon, self.lat)
    }
}

impl From<RawCoordinate> for Coordinate {
    fn from((lon, lat, label, direct): RawCoordinate) -> Self {
        Self {
            lon,
            lat,
            // The UI sends "" for unlabelled points
            label: label.filter(|x| !x.is_empty()),
            direct,
        }
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(pt: Coordinate) -> Self {
        (pt.lon, pt.lat, pt.label, pt.direct)
    }
}

/// One raw row of BRouter's `messages` property. Row 0 of a response is the header.
pub type TrackMessage = Vec<String>;

pub mod field {
    pub const LONGITUDE: usize = 0;
    pub const LATITUDE: usize = 1;
    pub const ELEVATION: usize = 2;
    pub const DISTANCE: usize = 3;
    pub const COST_PER_KM: usize = 4;
    pub const ELEVATION_COST: usize = 5;
    pub const TURN_COST: usize = 6;
    pub const NODE_COST: usize = 7;
    pub const INITIAL_COST: usize = 8;
    pub const WAY_TAGS: usize = 9;
    pub const NODE_TAGS: usize = 10;
    pub const TIME: usize = 11;
    pub const ENERGY: usize = 12;
}

/// BRouter writes most numeric properties as strings, but be lenient.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(x) => Some(*x),
            PropertyValue::Text(x) => x.trim().parse().ok(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyValue::Number(x) => write!(f, "{x}"),
            PropertyValue::Text(x) => write!(f, "{x:?}"),
        }
    }
}

/// The single feature of a BRouter GeoJSON response. Properties are flattened into the struct.
#[derive(Deserialize, Clone, Debug)]
pub struct BrouterFeature {
    #[serde(deserialize_with = "deserialize_geometry")]
    pub geometry: LineString,
    #[serde(default)]
    pub messages: Vec<TrackMessage>,
    #[serde(rename = "track-length")]
    pub track_length: Option<PropertyValue>,
    #[serde(rename = "filtered ascend")]
    pub filtered_ascend: Option<PropertyValue>,
    #[serde(rename = "plain-ascend")]
    pub plain_ascend: Option<PropertyValue>,
    #[serde(rename = "total-time")]
    pub total_time: Option<PropertyValue>,
    #[serde(rename = "total-energy")]
    pub total_energy: Option<PropertyValue>,
    pub cost: Option<PropertyValue>,
}

#[derive(Clone, Debug)]
pub struct BrouterResponse {
    pub features: Vec<BrouterFeature>,
}

impl BrouterResponse {
    pub fn from_geojson_str(input: &str) -> Result<Self, geojson::Error> {
        let features = geojson::de::deserialize_feature_collection_str_to_vec(input)?;
        Ok(Self { features })
    }
}
