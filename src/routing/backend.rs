// Routing collaborator contract

use crate::geo::LatLng;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One turn-by-turn step as returned by the routing library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    /// Guidance text, e.g. "Turn left onto Jalan Sudirman"
    pub text: String,
    /// Cumulative distance from the route start to the maneuver (meters)
    pub distance_from_start_m: f64,
}

/// A computed route as returned by the routing library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Route geometry, start to end
    pub polyline: Vec<LatLng>,
    /// Ordered turn-by-turn steps
    pub instructions: Vec<RouteStep>,
    /// Total route length in meters
    pub total_distance_m: f64,
    /// Estimated travel time in seconds
    pub total_time_secs: f64,
}

/// Errors from the routing collaborator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// No route exists between the waypoints
    #[error("No route found between the given waypoints")]
    NoRoute,
    /// Backend-specific failure
    #[error("Routing backend error: {0}")]
    Backend(String),
}

/// Contract for the routing collaborator.
///
/// Given `[start, end]` waypoints the backend returns geometry and
/// instructions or an error. Waypoint replacement is expressed by
/// issuing a new request; the engine drops responses for superseded
/// requests.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Compute a route between the two waypoints.
    async fn compute_route(&self, waypoints: [LatLng; 2]) -> Result<RouteResponse, RoutingError>;
}
