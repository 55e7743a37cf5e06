use super::*;

// Jakarta city center and Bandung, roughly 118 km apart.
const JAKARTA: LatLng = LatLng {
    lat: -6.2088,
    lng: 106.8456,
};
const BANDUNG: LatLng = LatLng {
    lat: -6.9175,
    lng: 107.6191,
};

#[test]
fn test_haversine_zero_for_same_point() {
    assert_eq!(haversine_m(JAKARTA, JAKARTA), 0.0);
}

#[test]
fn test_haversine_jakarta_bandung() {
    let d = haversine_m(JAKARTA, BANDUNG);
    // Known distance is ~118 km; allow a generous band for the
    // spherical approximation.
    assert!(d > 110_000.0 && d < 125_000.0, "unexpected distance {}", d);
}

#[test]
fn test_haversine_symmetric() {
    let ab = haversine_m(JAKARTA, BANDUNG);
    let ba = haversine_m(BANDUNG, JAKARTA);
    assert!((ab - ba).abs() < 1e-6);
}

#[test]
fn test_one_degree_latitude_is_about_111_km() {
    let a = LatLng::new(0.0, 0.0);
    let b = LatLng::new(1.0, 0.0);
    let d = haversine_m(a, b);
    assert!((d - 111_195.0).abs() < 100.0, "unexpected distance {}", d);
}

#[test]
fn test_bounds_contains() {
    let bounds = LatLngBounds::new(LatLng::new(-6.4, 106.6), LatLng::new(-6.0, 107.0));
    assert!(bounds.contains(JAKARTA));
    assert!(!bounds.contains(BANDUNG));
    // Edge is inclusive
    assert!(bounds.contains(LatLng::new(-6.4, 106.6)));
}

#[test]
fn test_cumulative_distances() {
    let polyline = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.001, 0.0),
        LatLng::new(0.002, 0.0),
    ];
    let cumulative = cumulative_distances_m(&polyline);
    assert_eq!(cumulative.len(), 3);
    assert_eq!(cumulative[0], 0.0);
    // 0.001 deg latitude is ~111 m
    assert!((cumulative[1] - 111.2).abs() < 1.0);
    assert!((cumulative[2] - 222.4).abs() < 1.0);
}

#[test]
fn test_cumulative_distances_empty() {
    assert!(cumulative_distances_m(&[]).is_empty());
}

#[test]
fn test_nearest_vertex() {
    let polyline = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.001, 0.0),
        LatLng::new(0.002, 0.0),
    ];
    let near_middle = LatLng::new(0.0011, 0.0001);
    assert_eq!(nearest_vertex(&polyline, near_middle), Some(1));
    assert_eq!(nearest_vertex(&[], near_middle), None);
}

#[test]
fn test_nearest_vertex_prefers_first_on_tie() {
    let polyline = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.0)];
    assert_eq!(nearest_vertex(&polyline, LatLng::new(0.0, 0.0)), Some(0));
}
