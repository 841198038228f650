use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{ClassificationTable, SURFACE, TRAFFIC};
use crate::track::{Track, TrackSample};

/// Seeded at 0, so a profile entirely below sea level reports 0.
pub fn max_elevation(samples: &[TrackSample]) -> f64 {
    samples.iter().fold(0.0, |acc, x| acc.max(x.elevation))
}

/// Infinity for an empty track.
pub fn min_elevation(samples: &[TrackSample]) -> f64 {
    samples
        .iter()
        .fold(f64::INFINITY, |acc, x| acc.min(x.elevation))
}

/// Meters per category, plus whatever part of the track no category claimed
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ClassifiedDistances {
    pub totals: BTreeMap<&'static str, f64>,
    pub unknown: f64,
}

impl ClassifiedDistances {
    pub fn get(&self, category: &str) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    pub fn classified(&self) -> f64 {
        self.totals.values().sum()
    }
}

/// Sums each sample's own distance into the category of its way tag. `track_length` is the
/// authoritative total; the residual against it is reported as unknown.
pub fn distance_by_classification(
    samples: &[TrackSample],
    table: &ClassificationTable,
    track_length: f64,
) -> ClassifiedDistances {
    let mut totals: BTreeMap<&'static str, f64> =
        table.categories.iter().map(|x| (x.name, 0.0)).collect();
    for sample in samples {
        if let Some(category) = table.classify(&sample.way_tags) {
            *totals.entry(category.name).or_insert(0.0) += sample.segment_distance;
        }
    }
    let mut result = ClassifiedDistances {
        totals,
        unknown: 0.0,
    };
    result.unknown = track_length - result.classified();
    result
}

/// Everything the UI shows next to a route
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TrackSummary {
    pub track_length: f64,
    pub filtered_ascent: Option<f64>,
    pub total_time_seconds: Option<f64>,
    pub cost: Option<f64>,
    pub min_elevation: Option<f64>,
    pub max_elevation: Option<f64>,
    pub surface: ClassifiedDistances,
    pub traffic: ClassifiedDistances,
}

impl TrackSummary {
    pub fn new(track: &Track) -> Self {
        // Without samples, the folds only return their seeds
        let has_samples = !track.samples.is_empty();
        Self {
            track_length: track.track_length,
            filtered_ascent: track.filtered_ascent,
            total_time_seconds: track.total_time_seconds,
            cost: track.cost,
            min_elevation: has_samples.then(|| min_elevation(&track.samples)),
            max_elevation: has_samples.then(|| max_elevation(&track.samples)),
            surface: distance_by_classification(&track.samples, &SURFACE, track.track_length),
            traffic: distance_by_classification(&track.samples, &TRAFFIC, track.track_length),
        }
    }
}
