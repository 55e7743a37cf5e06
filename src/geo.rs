// Geodesy primitives shared across the navigation core
//
// All distances are in meters over the WGS84 mean earth radius.
// Route polylines are short (bounded by a single urban route), so
// nearest-vertex lookup is a plain linear scan.

use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distance (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned bounding box over geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Whether the point falls inside the box (edges inclusive).
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Cumulative path length at each vertex of a polyline.
///
/// Returns one entry per vertex; the first is 0.0 and the last is the
/// total path length. Empty input yields an empty vector.
pub fn cumulative_distances_m(polyline: &[LatLng]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(polyline.len());
    let mut total = 0.0;
    for (i, vertex) in polyline.iter().enumerate() {
        if i > 0 {
            total += haversine_m(polyline[i - 1], *vertex);
        }
        cumulative.push(total);
    }
    cumulative
}

/// Index of the polyline vertex closest to the given point.
///
/// Linear scan; route polylines are bounded in length so no spatial
/// index is kept.
pub fn nearest_vertex(polyline: &[LatLng], point: LatLng) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, vertex) in polyline.iter().enumerate() {
        let d = haversine_m(*vertex, point);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
