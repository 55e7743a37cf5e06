// Route model - the single active route and its instruction flags

use super::backend::RouteResponse;
use crate::geo::{cumulative_distances_m, LatLng};
use crate::nav_constants::POLYLINE_HASH_QUANTUM;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One guidance step with its progress flags.
///
/// `announced` and `retired` are independent and monotonic: once set
/// they are never cleared for the lifetime of the route.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteInstruction {
    /// Guidance text
    pub text: String,
    /// Cumulative distance from the route start to the maneuver (meters)
    pub distance_from_start_m: f64,
    /// Passed and hidden, never shown again
    pub retired: bool,
    /// Spoken once on approach
    pub announced: bool,
}

/// The active route for the session.
///
/// Recreated wholesale on a full rebuild, where announcement and
/// retirement state resets with the route; a start-only update carries
/// the flags over via `inherit_progress`.
#[derive(Debug, Clone)]
pub struct Route {
    /// Start and end waypoints the route was requested with
    pub waypoints: [LatLng; 2],
    /// Route geometry, start to end
    pub polyline: Vec<LatLng>,
    /// Cumulative path length at each polyline vertex (meters)
    pub cumulative_m: Vec<f64>,
    /// Ordered instructions with progress flags
    pub instructions: Vec<RouteInstruction>,
    /// Total route length in meters
    pub total_distance_m: f64,
    /// Estimated travel time in seconds
    pub total_time_secs: f64,
    /// Hash over the quantized polyline, used to suppress duplicate
    /// route-found callbacks
    pub hash: u64,
}

impl Route {
    /// Build a route from a backend response. Instruction ordering is
    /// fixed here and never changes afterwards.
    pub fn from_response(waypoints: [LatLng; 2], response: RouteResponse) -> Self {
        let cumulative_m = cumulative_distances_m(&response.polyline);
        let hash = polyline_hash(&response.polyline);
        let mut instructions: Vec<RouteInstruction> = response
            .instructions
            .into_iter()
            .map(|step| RouteInstruction {
                text: step.text,
                distance_from_start_m: step.distance_from_start_m,
                retired: false,
                announced: false,
            })
            .collect();
        instructions.sort_by(|a, b| {
            a.distance_from_start_m
                .total_cmp(&b.distance_from_start_m)
        });

        Self {
            waypoints,
            polyline: response.polyline,
            cumulative_m,
            instructions,
            total_distance_m: response.total_distance_m,
            total_time_secs: response.total_time_secs,
            hash,
        }
    }

    /// End waypoint (the destination)
    pub fn destination(&self) -> LatLng {
        self.waypoints[1]
    }

    /// Carry announcement and retirement flags forward from the route
    /// this one replaces.
    ///
    /// A start-only recompute reissues the same journey from a nudged
    /// origin, so the maneuvers toward the destination are unchanged
    /// and their flags must survive the swap. Instructions are paired
    /// by text from the destination end backwards, which keeps
    /// repeated maneuver texts aligned with their counterparts.
    pub fn inherit_progress(&mut self, previous: &Route) {
        let mut candidates: Vec<&RouteInstruction> = previous.instructions.iter().collect();
        for instruction in self.instructions.iter_mut().rev() {
            let Some(at) = candidates
                .iter()
                .rposition(|old| old.text == instruction.text)
            else {
                continue;
            };
            let old = candidates.remove(at);
            instruction.announced = instruction.announced || old.announced;
            instruction.retired = instruction.retired || old.retired;
        }
    }
}

/// Hash a polyline with coordinates quantized to ~1e-5 degrees.
///
/// Routes that differ only by floating-point noise hash identically, so
/// a repeated routing callback for the same geometry is detectable.
pub fn polyline_hash(polyline: &[LatLng]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for vertex in polyline {
        let lat = (vertex.lat / POLYLINE_HASH_QUANTUM).round() as i64;
        let lng = (vertex.lng / POLYLINE_HASH_QUANTUM).round() as i64;
        lat.hash(&mut hasher);
        lng.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;
