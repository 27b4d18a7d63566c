//! Normalization from raw feed records to [`mcdo_core::Store`].

use std::collections::HashSet;

use mcdo_core::{coerce_id, Store};

use crate::types::RawStoreRecord;

/// Normalizes one raw record.
///
/// The id is coerced to a string, `latitude`/`longitude` become `lat`/`lng`
/// and a missing address becomes the empty string. Returns `None` only when
/// the record has no usable id; unreadable coordinates are kept as `None`.
#[must_use]
pub fn normalize_record(raw: RawStoreRecord) -> Option<Store> {
    let id = coerce_id(&raw.id)?;
    Some(Store {
        id,
        name: raw.name.unwrap_or_default(),
        lat: parse_coordinate(&raw.latitude),
        lng: parse_coordinate(&raw.longitude),
        address: raw.address.unwrap_or_default(),
    })
}

/// Normalizes a whole feed, keeping catalog order.
///
/// Records without an id are dropped, and so is any record repeating an id
/// already seen; both are logged.
#[must_use]
pub fn normalize_catalog(records: Vec<RawStoreRecord>) -> Vec<Store> {
    let mut seen = HashSet::new();
    let mut stores = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let name = raw.name.clone();
        let Some(store) = normalize_record(raw) else {
            tracing::warn!(index, name = ?name, "skipping store record without a usable id");
            continue;
        };
        if !seen.insert(store.id.clone()) {
            tracing::warn!(index, id = %store.id, "skipping store record with duplicate id");
            continue;
        }
        stores.push(store);
    }

    stores
}

/// Numbers pass through; strings are trimmed and parsed. Anything else is
/// `None`.
fn parse_coordinate(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
