use serde::{Deserialize, Serialize};

use velotrack_model::Coordinate;

use crate::weather::join_url;
use crate::{Error, Result};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    Trekking,
    Gravel,
    FastBike,
    FastBikeVeryLowTraffic,
}

impl Profile {
    /// The profile name BRouter knows
    pub fn brouter_id(self) -> &'static str {
        match self {
            Profile::Trekking => "trekking",
            Profile::Gravel => "gravel",
            Profile::FastBike => "fastbike",
            Profile::FastBikeVeryLowTraffic => "fastbike-verylowtraffic",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    GeoJson,
    /// Handed to the user as a download, never parsed
    Gpx,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::GeoJson => "geojson",
            Format::Gpx => "gpx",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct RouteRequest {
    pub points: Vec<Coordinate>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub format: Format,
}

impl RouteRequest {
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        if self.points.len() < 2 {
            return Err(Error::InsufficientPoints {
                got: self.points.len(),
            });
        }

        let lonlats: Vec<String> = self
            .points
            .iter()
            .map(|pt| format!("{:.6},{:.6}", pt.lon, pt.lat))
            .collect();
        let mut pairs = vec![
            ("lonlats", lonlats.join("|")),
            ("profile", self.profile.brouter_id().to_string()),
            ("alternativeidx", "0".to_string()),
            ("format", self.format.as_str().to_string()),
        ];

        // Indices of the points reached by a straight line
        let straight: Vec<String> = self
            .points
            .iter()
            .enumerate()
            .filter(|(_, pt)| pt.direct)
            .map(|(idx, _)| idx.to_string())
            .collect();
        if !straight.is_empty() {
            pairs.push(("straight", straight.join(",")));
        }

        let pois: Vec<String> = self
            .points
            .iter()
            .filter_map(|pt| {
                let label = pt.label.as_ref()?;
                Some(format!("{:.6},{:.6},{}", pt.lon, pt.lat, label))
            })
            .collect();
        if !pois.is_empty() {
            pairs.push(("pois", pois.join("|")));
        }

        Ok(pairs)
    }

    pub fn url(&self, base: &str) -> Result<String> {
        Ok(join_url(base, &self.query_pairs()?))
    }
}
