use super::*;

#[test]
fn test_exact_match() {
    let gazetteer = Gazetteer::new();
    let hit = gazetteer.lookup("bandung").unwrap();
    assert_eq!(hit.name, "bandung");
    assert_eq!(hit.score, 1.0);
}

#[test]
fn test_case_and_whitespace_insensitive() {
    let gazetteer = Gazetteer::new();
    let hit = gazetteer.lookup("  Bandung ").unwrap();
    assert_eq!(hit.name, "bandung");
}

#[test]
fn test_fuzzy_near_miss() {
    // Recognition output drops a letter
    let gazetteer = Gazetteer::new();
    let hit = gazetteer.lookup("bandun").unwrap();
    assert_eq!(hit.name, "bandung");
    assert!(hit.score < 1.0 && hit.score >= GAZETTEER_FUZZY_THRESHOLD);
}

#[test]
fn test_unrelated_name_misses() {
    let gazetteer = Gazetteer::new();
    assert!(gazetteer.lookup("some cafe on a corner").is_none());
}

#[test]
fn test_empty_query_misses() {
    let gazetteer = Gazetteer::new();
    assert!(gazetteer.lookup("").is_none());
    assert!(gazetteer.lookup("   ").is_none());
}

#[test]
fn test_threshold_is_configurable() {
    let strict = Gazetteer::with_threshold(0.99);
    assert!(strict.lookup("bandun").is_none());
    assert!(strict.lookup("bandung").is_some());
}
