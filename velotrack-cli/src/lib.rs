use anyhow::Result;
use geojson::{Feature, FeatureCollection, Geometry};
use log::info;

use velotrack::classify::{SURFACE, TRAFFIC};
use velotrack::geometry::point_at_distance;
use velotrack::track::Track;

/// Dumps the route line plus one point per decoded sample, with the derived values as
/// properties, for eyeballing in a GeoJSON viewer.
pub fn debug_geojson(track: &Track) -> Result<FeatureCollection> {
    let mut features = Vec::new();

    let mut line = Feature::from(Geometry::from(&track.line));
    line.set_property("track_length", track.track_length);
    line.set_property("filtered_ascent", track.filtered_ascent);
    line.set_property("cost", track.cost);
    line.set_property("samples", track.samples.len());
    features.push(line);

    for (idx, sample) in track.samples.iter().enumerate() {
        // Samples don't carry positions; place them by distance along the line
        let pt = point_at_distance(&track.line, sample.distance_from_start)?;
        let mut f = Feature::from(Geometry::from(geojson::Value::Point(vec![pt.x(), pt.y()])));
        f.set_property("sample", idx);
        f.set_property("distance_from_start", sample.distance_from_start);
        f.set_property("segment_distance", sample.segment_distance);
        f.set_property("elevation", sample.elevation);
        f.set_property(
            "surface",
            SURFACE.classify(&sample.way_tags).map(|x| x.name),
        );
        f.set_property(
            "traffic",
            TRAFFIC.classify(&sample.way_tags).map(|x| x.name),
        );
        for (key, value) in sample.way_tags.iter() {
            f.set_property(format!("way:{key}"), value);
        }
        for (key, value) in sample.node_tags.iter() {
            f.set_property(format!("node:{key}"), value);
        }
        features.push(f);
    }

    info!("Dumping {} features", features.len());
    Ok(features.into_iter().collect())
}
