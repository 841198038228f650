use velotrack_model::Coordinate;

use crate::geometry::{line_from_route, nearest_point_on_line};
use crate::Result;

/// Returns a new route with `candidate` placed where it falls along the existing route.
pub fn insert_point(candidate: Coordinate, route: &[Coordinate]) -> Result<Vec<Coordinate>> {
    let idx = insertion_index(&candidate, route)?;
    let mut result = Vec::with_capacity(route.len() + 1);
    result.extend_from_slice(&route[..idx]);
    result.push(candidate);
    result.extend_from_slice(&route[idx..]);
    Ok(result)
}

/// The index `candidate` would take. Every route point is projected back onto the line the route
/// itself defines; the candidate goes before the first point projecting strictly further along.
/// Locations are compared at 5 decimals, so a tie keeps the candidate after the existing point.
///
/// Duplicate or nearly collinear anchors aren't special-cased and can produce surprising orders.
pub fn insertion_index(candidate: &Coordinate, route: &[Coordinate]) -> Result<usize> {
    if route.len() < 2 {
        return Ok(route.len());
    }

    let line = line_from_route(route);
    let candidate_location = round5(nearest_point_on_line(&line, candidate.to_point())?.location);
    for (idx, pt) in route.iter().enumerate() {
        let location = round5(nearest_point_on_line(&line, pt.to_point())?.location);
        if location > candidate_location {
            return Ok(idx);
        }
    }
    Ok(route.len())
}

fn round5(x: f64) -> f64 {
    (x * 1e5).round() / 1e5
}
