use super::*;
use crate::geo::LatLng;
use crate::route_store::NamedLocation;
use tempfile::TempDir;

fn slot(id: u8, name: &str) -> NamedRouteSlot {
    NamedRouteSlot {
        id,
        name: name.to_string(),
        start: Some(NamedLocation {
            name: "jakarta".to_string(),
            point: LatLng::new(-6.2088, 106.8456),
        }),
        end: Some(NamedLocation {
            name: "bandung".to_string(),
            point: LatLng::new(-6.9175, 107.6191),
        }),
    }
}

fn store_in(dir: &TempDir) -> FileRouteStore {
    FileRouteStore::new(dir.path().join("routes.json"))
}

#[test]
fn test_set_and_get() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.set(slot(2, "jakarta - bandung")).unwrap();
    let loaded = store.get(2).unwrap().unwrap();
    assert_eq!(loaded.name, "jakarta - bandung");
    assert_eq!(store.get(3).unwrap(), None);
}

#[test]
fn test_invalid_slot_ids_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    assert_eq!(store.get(0), Err(RouteStoreError::InvalidSlot(0)));
    assert_eq!(store.get(7), Err(RouteStoreError::InvalidSlot(7)));
    assert_eq!(
        store.set(slot(9, "nope")),
        Err(RouteStoreError::InvalidSlot(9))
    );
    assert_eq!(store.delete(7), Err(RouteStoreError::InvalidSlot(7)));
}

#[test]
fn test_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = store_in(&dir);
        store.set(slot(1, "home - work")).unwrap();
        store.set(slot(6, "work - gym")).unwrap();
    }

    let mut reloaded = store_in(&dir);
    reloaded.load().unwrap();
    assert_eq!(reloaded.list().len(), 2);
    assert_eq!(reloaded.get(1).unwrap().unwrap().name, "home - work");
    assert_eq!(reloaded.get(6).unwrap().unwrap().name, "work - gym");
}

#[test]
fn test_delete_clears_slot() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.set(slot(3, "a - b")).unwrap();
    store.delete(3).unwrap();
    assert_eq!(store.get(3).unwrap(), None);

    // Deleting an empty slot is fine
    store.delete(3).unwrap();
}

#[test]
fn test_list_ordered_by_id() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.set(slot(5, "e")).unwrap();
    store.set(slot(2, "b")).unwrap();
    store.set(slot(4, "d")).unwrap();

    let ids: Vec<u8> = store.list().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 4, 5]);
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn test_load_skips_corrupt_slot_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    std::fs::write(
        &path,
        r#"[{"id": 9, "name": "bad", "start": null, "end": null},
            {"id": 2, "name": "good", "start": null, "end": null}]"#,
    )
    .unwrap();

    let mut store = FileRouteStore::new(path);
    store.load().unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.get(2).unwrap().unwrap().name, "good");
}
