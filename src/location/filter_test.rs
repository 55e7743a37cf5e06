use super::*;

fn fix(lat: f64, lng: f64, accuracy_m: f64) -> GpsFix {
    GpsFix {
        lat,
        lng,
        accuracy_m,
        timestamp: chrono::Utc::now(),
    }
}

// Inside the default Greater Jakarta region
fn default_region_fix(accuracy_m: f64) -> GpsFix {
    fix(-6.2, 106.8, accuracy_m)
}

// Outside the default region
fn bandung_fix(accuracy_m: f64) -> GpsFix {
    fix(-6.9175, 107.6191, accuracy_m)
}

#[test]
fn test_first_good_fix_accepted() {
    let mut filter = LocationFilter::new();
    let result = filter.ingest(bandung_fix(20.0));

    assert_eq!(
        result,
        FixAssessment::Accepted {
            position_changed: true
        }
    );
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 20.0);
    assert!(!filter.is_low_confidence());
}

#[test]
fn test_best_fix_accuracy_never_worsens() {
    let mut filter = LocationFilter::new();
    let accuracies = [300.0, 50.0, 400.0, 20.0, 499.0, 5.0];

    let mut best_seen = f64::INFINITY;
    for accuracy in accuracies {
        let _ = filter.ingest(bandung_fix(accuracy));
        let best = filter.best_fix().unwrap().accuracy_m;
        assert!(best <= best_seen, "best fix worsened: {} > {}", best, best_seen);
        best_seen = best;
    }
    assert_eq!(best_seen, 5.0);
}

#[test]
fn test_accuracy_above_cutoff_rejected_unless_improving() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(bandung_fix(900.0)); // no best fix: improves by default
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 900.0);

    // 700 m is above the cutoff but improves on 900 m
    let result = filter.ingest(bandung_fix(700.0));
    assert_eq!(
        result,
        FixAssessment::Accepted {
            position_changed: false
        }
    );
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 700.0);

    // 800 m neither acceptable nor an improvement
    let result = filter.ingest(fix(-6.95, 107.65, 800.0));
    assert_eq!(
        result,
        FixAssessment::Rejected(RejectionReason::AccuracyTooLow)
    );
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 700.0);
}

#[test]
fn test_default_region_fix_without_best_is_low_confidence() {
    let mut filter = LocationFilter::new();
    let result = filter.ingest(default_region_fix(15_000.0));

    assert_eq!(
        result,
        FixAssessment::AcceptedLowConfidence {
            position_changed: true
        }
    );
    assert!(filter.is_low_confidence());
    assert!(filter.effective_position().is_some());
}

#[test]
fn test_default_region_fix_never_replaces_best() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(bandung_fix(30.0));

    let result = filter.ingest(default_region_fix(20_000.0));
    assert_eq!(result, FixAssessment::Rejected(RejectionReason::DefaultRegion));
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 30.0);
    assert!(!filter.is_low_confidence());
}

#[test]
fn test_default_region_with_good_accuracy_is_a_real_fix() {
    // The heuristic only fires when accuracy is also poor; users do
    // drive through Jakarta.
    let mut filter = LocationFilter::new();
    let result = filter.ingest(default_region_fix(25.0));
    assert_eq!(
        result,
        FixAssessment::Accepted {
            position_changed: true
        }
    );
    assert!(!filter.is_low_confidence());
}

#[test]
fn test_sub_epsilon_movement_not_reported() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(bandung_fix(10.0));

    // ~0.5 m north of the previous fix
    let result = filter.ingest(fix(-6.9175045, 107.6191, 10.0));
    assert_eq!(
        result,
        FixAssessment::Accepted {
            position_changed: false
        }
    );
}

#[test]
fn test_fresh_request_supersedes_best_fix() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(bandung_fix(10.0));

    filter.request_fresh();
    // Worse accuracy, but the fresh request overrides the best fix
    let result = filter.ingest(fix(-6.93, 107.63, 80.0));
    assert_eq!(
        result,
        FixAssessment::Accepted {
            position_changed: true
        }
    );
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 80.0);
}

#[test]
fn test_fresh_request_clears_low_confidence() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(default_region_fix(15_000.0));
    assert!(filter.is_low_confidence());

    filter.request_fresh();
    let _ = filter.ingest(bandung_fix(15_000.0));
    assert!(!filter.is_low_confidence());
}

#[test]
fn test_better_fix_clears_low_confidence() {
    let mut filter = LocationFilter::new();
    let _ = filter.ingest(default_region_fix(15_000.0));
    assert!(filter.is_low_confidence());

    let _ = filter.ingest(bandung_fix(20.0));
    assert!(!filter.is_low_confidence());
    assert_eq!(filter.best_fix().unwrap().accuracy_m, 20.0);
}
