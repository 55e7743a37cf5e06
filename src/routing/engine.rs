// Route recompute engine
//
// Decides between a full rebuild and an in-place start update, tags
// every backend request with a monotonically increasing id, and drops
// responses that arrive for anything but the latest request. Routing
// callbacks and position updates interleave in any order; the id check
// is what keeps a stale route from overwriting a newer one.

use super::backend::RouteResponse;
use super::route::{polyline_hash, Route};
use crate::geo::{haversine_m, LatLng};
use crate::nav_constants::{
    DESTINATION_REBUILD_THRESHOLD_M, ROUTE_ANNOUNCE_DEBOUNCE_MS, START_UPDATE_THRESHOLD_M,
};
use std::time::{Duration, Instant};

/// Configuration for route recomputation
#[derive(Debug, Clone)]
pub struct RouteEngineConfig {
    /// Destination movement that forces a full rebuild (meters)
    pub destination_rebuild_threshold_m: f64,
    /// Start movement that triggers an in-place waypoint update (meters)
    pub start_update_threshold_m: f64,
    /// Window during which a newly found route is not re-announced
    pub announce_debounce: Duration,
}

impl Default for RouteEngineConfig {
    fn default() -> Self {
        Self {
            destination_rebuild_threshold_m: DESTINATION_REBUILD_THRESHOLD_M,
            start_update_threshold_m: START_UPDATE_THRESHOLD_M,
            announce_debounce: Duration::from_millis(ROUTE_ANNOUNCE_DEBOUNCE_MS),
        }
    }
}

/// What a recompute request amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputePlan {
    /// Destination changed: old route discarded, brand-new route requested
    FullRebuild { request_id: u64 },
    /// Only the start moved: waypoints replaced, no re-announcement
    StartOnlyUpdate { request_id: u64 },
    /// Neither endpoint moved enough to matter
    Unchanged,
}

impl RecomputePlan {
    /// Request id when a backend request is warranted
    pub fn request_id(&self) -> Option<u64> {
        match self {
            RecomputePlan::FullRebuild { request_id }
            | RecomputePlan::StartOnlyUpdate { request_id } => Some(*request_id),
            RecomputePlan::Unchanged => None,
        }
    }
}

/// Outcome of handling one backend response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A route was installed; `announce` is false for start-only updates
    /// and within the debounce window of the previous announcement
    New { announce: bool },
    /// Same polyline hash as the route already handled; nothing to do
    Duplicate,
    /// Response for a request that is no longer the latest; dropped
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    FullRebuild,
    StartOnlyUpdate,
}

#[derive(Debug, Clone)]
struct PendingRequest {
    id: u64,
    kind: RequestKind,
    waypoints: [LatLng; 2],
}

/// Computes and incrementally updates the session's single active route
pub struct RouteEngine {
    config: RouteEngineConfig,
    route: Option<Route>,
    pending: Option<PendingRequest>,
    next_request_id: u64,
    /// Hash of the last handled polyline, cleared on full rebuild
    last_hash: Option<u64>,
    last_announced_at: Option<Instant>,
}

impl RouteEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(RouteEngineConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(config: RouteEngineConfig) -> Self {
        Self {
            config,
            route: None,
            pending: None,
            next_request_id: 0,
            last_hash: None,
            last_announced_at: None,
        }
    }

    /// The active route, if any
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Mutable access for instruction tracking
    pub fn route_mut(&mut self) -> Option<&mut Route> {
        self.route.as_mut()
    }

    /// The waypoints of the latest request or route, if any
    pub fn current_destination(&self) -> Option<LatLng> {
        self.pending
            .as_ref()
            .map(|p| p.waypoints[1])
            .or_else(|| self.route.as_ref().map(|r| r.destination()))
    }

    /// Plan a recompute for the given endpoints.
    ///
    /// A full rebuild discards the current route and its hash before the
    /// backend even responds; the session has no route until the new one
    /// arrives. A start-only update leaves the route in place.
    pub fn plan_recompute(&mut self, start: LatLng, end: LatLng) -> RecomputePlan {
        let reference = self
            .pending
            .as_ref()
            .map(|p| (p.waypoints[0], p.waypoints[1]))
            .or_else(|| self.route.as_ref().map(|r| (r.waypoints[0], r.destination())));

        let kind = match reference {
            None => RequestKind::FullRebuild,
            Some((_, ref_end))
                if haversine_m(ref_end, end) > self.config.destination_rebuild_threshold_m =>
            {
                RequestKind::FullRebuild
            }
            Some((ref_start, _))
                if haversine_m(ref_start, start) > self.config.start_update_threshold_m =>
            {
                RequestKind::StartOnlyUpdate
            }
            Some(_) => return RecomputePlan::Unchanged,
        };

        // A start nudge while no route is installed yet (previous request
        // still in flight or failed) is still a first-time build
        let kind = if kind == RequestKind::StartOnlyUpdate && self.route.is_none() {
            RequestKind::FullRebuild
        } else {
            kind
        };

        if kind == RequestKind::FullRebuild {
            crate::info!(
                "[routing] Full rebuild to ({:.5}, {:.5}), discarding current route",
                end.lat,
                end.lng
            );
            self.route = None;
            self.last_hash = None;
        } else {
            crate::debug!("[routing] Start-only update from ({:.5}, {:.5})", start.lat, start.lng);
        }

        self.next_request_id += 1;
        let id = self.next_request_id;
        self.pending = Some(PendingRequest {
            id,
            kind,
            waypoints: [start, end],
        });

        match kind {
            RequestKind::FullRebuild => RecomputePlan::FullRebuild { request_id: id },
            RequestKind::StartOnlyUpdate => RecomputePlan::StartOnlyUpdate { request_id: id },
        }
    }

    /// Handle a backend response for the given request id.
    pub fn handle_response(
        &mut self,
        request_id: u64,
        response: RouteResponse,
        now: Instant,
    ) -> RouteOutcome {
        let pending = match &self.pending {
            Some(p) if p.id == request_id => p.clone(),
            _ => {
                crate::debug!("[routing] Dropping superseded response for request {}", request_id);
                return RouteOutcome::Superseded;
            }
        };
        self.pending = None;

        let hash = polyline_hash(&response.polyline);
        if self.last_hash == Some(hash) {
            crate::debug!("[routing] Duplicate route (hash {:x}), ignoring", hash);
            return RouteOutcome::Duplicate;
        }

        let mut route = Route::from_response(pending.waypoints, response);
        if pending.kind == RequestKind::StartOnlyUpdate {
            // The instructions were rebuilt from the response; progress
            // flags stay monotonic across an in-place update
            if let Some(previous) = &self.route {
                route.inherit_progress(previous);
            }
        }
        crate::info!(
            "[routing] Route installed: {:.0}m, {} instructions, hash {:x}",
            route.total_distance_m,
            route.instructions.len(),
            hash
        );
        self.route = Some(route);
        self.last_hash = Some(hash);

        let announce = pending.kind == RequestKind::FullRebuild
            && self
                .last_announced_at
                .map(|at| now.duration_since(at) >= self.config.announce_debounce)
                .unwrap_or(true);
        if announce {
            self.last_announced_at = Some(now);
        }
        RouteOutcome::New { announce }
    }

    /// Handle a backend failure. Returns true when the failure belongs
    /// to the latest request, in which case the caller surfaces it and
    /// prompts for a new destination; there is no automatic retry.
    pub fn handle_failure(&mut self, request_id: u64) -> bool {
        match &self.pending {
            Some(p) if p.id == request_id => {
                crate::warn!("[routing] Request {} failed, waiting for a new destination", request_id);
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the route and any pending request (app reset)
    pub fn clear(&mut self) {
        self.route = None;
        self.pending = None;
        self.last_hash = None;
        self.last_announced_at = None;
    }
}

impl Default for RouteEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
