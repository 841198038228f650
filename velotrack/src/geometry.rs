use geo::{Closest, ClosestPoint, Coord, Distance, Haversine, Line, LineString, Point};

use velotrack_model::Coordinate;

use crate::{Error, Result};

/// Where a point projects onto a line
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NearestPoint {
    /// Meters along the line from its first vertex
    pub location: f64,
    pub point: Point,
    /// Index of the segment holding `point`
    pub segment: usize,
}

pub fn line_from_route(route: &[Coordinate]) -> LineString {
    route
        .iter()
        .map(|pt| Coord {
            x: pt.lon,
            y: pt.lat,
        })
        .collect()
}

/// Projects `point` onto the closest segment of `line`. Closest points are found per segment in
/// lon/lat space, then segments compete by haversine distance; the earliest one wins ties.
pub fn nearest_point_on_line(line: &LineString, point: Point) -> Result<NearestPoint> {
    require_segments(line)?;

    let mut best: Option<(f64, NearestPoint)> = None;
    let mut walked = 0.0;
    for (idx, segment) in line.lines().enumerate() {
        let closest = closest_on_segment(segment, point);
        let dist = Haversine.distance(closest, point);
        if best.as_ref().map_or(true, |(best_dist, _)| dist < *best_dist) {
            best = Some((
                dist,
                NearestPoint {
                    location: walked + Haversine.distance(Point::from(segment.start), closest),
                    point: closest,
                    segment: idx,
                },
            ));
        }
        walked += segment_length(segment);
    }

    best.map(|(_, nearest)| nearest)
        .ok_or(Error::InsufficientPoints { got: line.0.len() })
}

/// The point `meters` along the line, clamped to the first and last vertex.
pub fn point_at_distance(line: &LineString, meters: f64) -> Result<Point> {
    require_segments(line)?;
    let first = line.0[0];
    let last = line.0[line.0.len() - 1];
    if meters <= 0.0 {
        return Ok(first.into());
    }
    if meters >= line_length(line)? {
        return Ok(last.into());
    }

    let mut walked = 0.0;
    for segment in line.lines() {
        let len = segment_length(segment);
        if len > 0.0 && walked + len >= meters {
            let ratio = (meters - walked) / len;
            return Ok((segment.start + (segment.end - segment.start) * ratio).into());
        }
        walked += len;
    }
    Ok(last.into())
}

/// Haversine length in meters, the same convention BRouter's `track-length` uses.
pub fn line_length(line: &LineString) -> Result<f64> {
    require_segments(line)?;
    Ok(line.lines().map(segment_length).sum())
}

fn segment_length(segment: Line) -> f64 {
    Haversine.distance(Point::from(segment.start), Point::from(segment.end))
}

fn closest_on_segment(segment: Line, point: Point) -> Point {
    match segment.closest_point(&point) {
        Closest::Intersection(pt) | Closest::SinglePoint(pt) => pt,
        // A zero-length segment
        Closest::Indeterminate => segment.start.into(),
    }
}

fn require_segments(line: &LineString) -> Result<()> {
    if line.0.len() < 2 {
        return Err(Error::InsufficientPoints { got: line.0.len() });
    }
    Ok(())
}
