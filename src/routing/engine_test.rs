use super::*;
use crate::routing::backend::RouteStep;
use std::time::{Duration, Instant};

const START: LatLng = LatLng {
    lat: -6.2088,
    lng: 106.8456,
};
// ~5 km south of START
const NEAR_END: LatLng = LatLng {
    lat: -6.2538,
    lng: 106.8456,
};
// ~50 km southeast of START
const FAR_END: LatLng = LatLng {
    lat: -6.6,
    lng: 107.1,
};

fn response_to(end: LatLng) -> RouteResponse {
    RouteResponse {
        polyline: vec![START, LatLng::new((START.lat + end.lat) / 2.0, end.lng), end],
        instructions: vec![
            RouteStep {
                text: "Head south".to_string(),
                distance_from_start_m: 0.0,
            },
            RouteStep {
                text: "Arrive at destination".to_string(),
                distance_from_start_m: 5000.0,
            },
        ],
        total_distance_m: 5000.0,
        total_time_secs: 600.0,
    }
}

#[test]
fn test_first_plan_is_full_rebuild() {
    let mut engine = RouteEngine::new();
    let plan = engine.plan_recompute(START, NEAR_END);
    assert!(matches!(plan, RecomputePlan::FullRebuild { .. }));
}

#[test]
fn test_new_route_announced_once() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let plan = engine.plan_recompute(START, NEAR_END);
    let id = plan.request_id().unwrap();

    let outcome = engine.handle_response(id, response_to(NEAR_END), now);
    assert_eq!(outcome, RouteOutcome::New { announce: true });
    assert!(engine.route().is_some());
}

#[test]
fn test_duplicate_polyline_not_rehandled() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), now);

    // A repeated route-found callback for the already-handled request
    // is dropped by the id check
    let outcome = engine.handle_response(id, response_to(NEAR_END), now);
    assert_eq!(outcome, RouteOutcome::Superseded);

    // A start-only update that comes back with identical geometry is
    // dropped by the hash check
    let moved_start = LatLng::new(START.lat + 0.0002, START.lng);
    let id = match engine.plan_recompute(moved_start, NEAR_END) {
        RecomputePlan::StartOnlyUpdate { request_id } => request_id,
        other => panic!("expected start-only update, got {:?}", other),
    };
    let outcome = engine.handle_response(id, response_to(NEAR_END), now);
    assert_eq!(outcome, RouteOutcome::Duplicate);
}

#[test]
fn test_same_endpoints_do_not_replan() {
    let mut engine = RouteEngine::new();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), Instant::now());
    assert_eq!(engine.plan_recompute(START, NEAR_END), RecomputePlan::Unchanged);
}

#[test]
fn test_stale_response_superseded() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let stale = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let fresh = engine.plan_recompute(START, FAR_END).request_id().unwrap();
    assert_ne!(stale, fresh);

    // The older response arrives after the newer request was issued
    let outcome = engine.handle_response(stale, response_to(NEAR_END), now);
    assert_eq!(outcome, RouteOutcome::Superseded);
    assert!(engine.route().is_none());

    let outcome = engine.handle_response(fresh, response_to(FAR_END), now);
    assert_eq!(outcome, RouteOutcome::New { announce: true });
}

#[test]
fn test_destination_change_forces_full_rebuild_and_resets_flags() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), now);
    let old_hash = engine.route().unwrap().hash;

    // Mark progress on the old route
    engine.route_mut().unwrap().instructions[0].announced = true;
    engine.route_mut().unwrap().instructions[0].retired = true;

    // Destination moves from 5 km away to 50 km away
    let plan = engine.plan_recompute(START, FAR_END);
    assert!(matches!(plan, RecomputePlan::FullRebuild { .. }));
    assert!(engine.route().is_none(), "old route must be discarded");

    let now = now + Duration::from_millis(1500);
    let outcome = engine.handle_response(plan.request_id().unwrap(), response_to(FAR_END), now);
    assert_eq!(outcome, RouteOutcome::New { announce: true });

    let route = engine.route().unwrap();
    assert_ne!(route.hash, old_hash);
    assert!(route.instructions.iter().all(|i| !i.announced && !i.retired));
}

#[test]
fn test_start_drift_is_in_place_update_without_announcement() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), now);

    // Start moves ~22 m north: beyond the start threshold, well below
    // the destination threshold
    let moved_start = LatLng::new(START.lat + 0.0002, START.lng);
    let plan = engine.plan_recompute(moved_start, NEAR_END);
    let id = match plan {
        RecomputePlan::StartOnlyUpdate { request_id } => request_id,
        other => panic!("expected start-only update, got {:?}", other),
    };

    let mut updated = response_to(NEAR_END);
    updated.polyline[0] = moved_start;
    let outcome = engine.handle_response(id, updated, now + Duration::from_millis(10));
    assert_eq!(outcome, RouteOutcome::New { announce: false });
}

#[test]
fn test_start_drift_before_first_route_is_full_rebuild() {
    let mut engine = RouteEngine::new();
    let first = engine.plan_recompute(START, NEAR_END).request_id().unwrap();

    // The first response has not arrived yet; a start nudge must not
    // demote the pending build to an un-announced update
    let moved_start = LatLng::new(START.lat + 0.0002, START.lng);
    let plan = engine.plan_recompute(moved_start, NEAR_END);
    assert!(matches!(plan, RecomputePlan::FullRebuild { .. }));
    assert!(plan.request_id().unwrap() > first);
}

#[test]
fn test_start_update_keeps_announced_maneuver_quiet() {
    use crate::guidance::InstructionTracker;

    // Straight 1 km route north, maneuver 500 m out
    let polyline: Vec<LatLng> = (0..=9)
        .map(|i| LatLng::new(i as f64 * 0.001, 0.0))
        .collect();
    let response = RouteResponse {
        polyline: polyline.clone(),
        instructions: vec![RouteStep {
            text: "Belok kiri".to_string(),
            distance_from_start_m: 500.0,
        }],
        total_distance_m: 1000.0,
        total_time_secs: 90.0,
    };

    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let id = engine
        .plan_recompute(polyline[0], polyline[9])
        .request_id()
        .unwrap();
    let _ = engine.handle_response(id, response, now);

    // The approach announcement fires once, ~166 m out
    let tracker = InstructionTracker::new();
    let car = LatLng::new(0.003, 0.0);
    let update = tracker
        .on_position(engine.route_mut().unwrap(), car)
        .unwrap();
    assert_eq!(update.announcements.len(), 1);

    // The car has drifted ~22 m from the requested start; the recompute
    // is start-only and the response keeps the remaining geometry
    let moved = LatLng::new(0.0002, 0.0);
    let plan = engine.plan_recompute(moved, polyline[9]);
    let id = match plan {
        RecomputePlan::StartOnlyUpdate { request_id } => request_id,
        other => panic!("expected start-only update, got {:?}", other),
    };
    let mut shifted = polyline.clone();
    shifted[0] = moved;
    let updated = RouteResponse {
        polyline: shifted,
        instructions: vec![RouteStep {
            text: "Belok kiri".to_string(),
            distance_from_start_m: 478.0,
        }],
        total_distance_m: 978.0,
        total_time_secs: 88.0,
    };
    let outcome = engine.handle_response(id, updated, now + Duration::from_millis(10));
    assert_eq!(outcome, RouteOutcome::New { announce: false });

    // The flag survived the swap, so tracking the same car position
    // does not repeat the maneuver
    assert!(engine.route().unwrap().instructions[0].announced);
    let update = tracker
        .on_position(engine.route_mut().unwrap(), car)
        .unwrap();
    assert!(
        update.announcements.is_empty(),
        "maneuver repeated after start-only update: {:?}",
        update.announcements
    );
}

#[test]
fn test_tiny_start_drift_unchanged() {
    let mut engine = RouteEngine::new();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), Instant::now());

    // ~2 m of drift
    let moved_start = LatLng::new(START.lat + 0.00002, START.lng);
    assert_eq!(engine.plan_recompute(moved_start, NEAR_END), RecomputePlan::Unchanged);
}

#[test]
fn test_announcement_debounced_within_window() {
    let mut engine = RouteEngine::new();
    let now = Instant::now();
    let id = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let _ = engine.handle_response(id, response_to(NEAR_END), now);

    // Second full rebuild whose response lands inside the debounce window
    let plan = engine.plan_recompute(START, FAR_END);
    let outcome = engine.handle_response(
        plan.request_id().unwrap(),
        response_to(FAR_END),
        now + Duration::from_millis(500),
    );
    assert_eq!(outcome, RouteOutcome::New { announce: false });
}

#[test]
fn test_failure_only_counts_for_latest_request() {
    let mut engine = RouteEngine::new();
    let stale = engine.plan_recompute(START, NEAR_END).request_id().unwrap();
    let fresh = engine.plan_recompute(START, FAR_END).request_id().unwrap();

    assert!(!engine.handle_failure(stale));
    assert!(engine.handle_failure(fresh));
    // No retry was scheduled; a new plan is needed
    assert!(engine.route().is_none());
}
