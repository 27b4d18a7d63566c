//! Wire types for the store location feed.

use serde::Deserialize;

/// One record as published by the feed:
/// `{ id, name, latitude, longitude, address? }`.
///
/// Fields are kept loose (`serde_json::Value`) where the feed has been seen to
/// vary: ids arrive as numbers or strings, coordinates as numbers or numeric
/// strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStoreRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: serde_json::Value,
    #[serde(default)]
    pub longitude: serde_json::Value,
    #[serde(default)]
    pub address: Option<String>,
}
