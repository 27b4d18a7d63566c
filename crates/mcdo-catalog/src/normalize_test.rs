use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawStoreRecord {
    serde_json::from_value(value).expect("fixture must deserialize")
}

// -----------------------------------------------------------------------
// normalize_record
// -----------------------------------------------------------------------

#[test]
fn normalize_record_maps_feed_fields() {
    let store = normalize_record(raw(json!({
        "id": 13001,
        "name": "渋谷道玄坂店",
        "latitude": 35.6581,
        "longitude": 139.6975,
        "address": "東京都渋谷区道玄坂2-6-17"
    })))
    .unwrap();

    assert_eq!(store.id, "13001");
    assert_eq!(store.name, "渋谷道玄坂店");
    assert_eq!(store.lat, Some(35.6581));
    assert_eq!(store.lng, Some(139.6975));
    assert_eq!(store.address, "東京都渋谷区道玄坂2-6-17");
}

#[test]
fn normalize_record_defaults_missing_address() {
    let store = normalize_record(raw(json!({
        "id": "A1",
        "name": "Store",
        "latitude": 35.0,
        "longitude": 139.0
    })))
    .unwrap();
    assert_eq!(store.address, "");

    let store = normalize_record(raw(json!({
        "id": "A1",
        "name": "Store",
        "latitude": 35.0,
        "longitude": 139.0,
        "address": null
    })))
    .unwrap();
    assert_eq!(store.address, "");
}

#[test]
fn normalize_record_parses_string_coordinates() {
    let store = normalize_record(raw(json!({
        "id": 1,
        "name": "Store",
        "latitude": " 35.5 ",
        "longitude": "139.25"
    })))
    .unwrap();
    assert_eq!(store.lat, Some(35.5));
    assert_eq!(store.lng, Some(139.25));
}

#[test]
fn normalize_record_keeps_store_with_bad_coordinates() {
    let store = normalize_record(raw(json!({
        "id": 1,
        "name": "Store",
        "latitude": "north-ish",
        "longitude": null
    })))
    .unwrap();
    assert_eq!(store.lat, None);
    assert_eq!(store.lng, None);
    assert!(store.position().is_none());
}

#[test]
fn normalize_record_without_id_is_none() {
    assert!(normalize_record(raw(json!({"name": "No id"}))).is_none());
    assert!(normalize_record(raw(json!({"id": {"nested": 1}, "name": "Odd"}))).is_none());
}

// -----------------------------------------------------------------------
// normalize_catalog
// -----------------------------------------------------------------------

#[test]
fn normalize_catalog_keeps_order_and_drops_duplicates() {
    let records = vec![
        raw(json!({"id": 2, "name": "Second", "latitude": 1, "longitude": 1})),
        raw(json!({"id": 1, "name": "First", "latitude": 1, "longitude": 1})),
        raw(json!({"id": "2", "name": "Dup", "latitude": 1, "longitude": 1})),
        raw(json!({"name": "Missing id"})),
    ];

    let stores = normalize_catalog(records);

    let ids: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(stores[0].name, "Second");
}
