//! Store records as loaded from the catalog feed.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// One store location. Identity is `id`, compared as an opaque string.
///
/// Coordinates are kept as the feed provided them; a record whose latitude or
/// longitude could not be read as a number carries `None` and is left to the
/// map presentation to skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Empty when the feed omits it.
    #[serde(default)]
    pub address: String,
}

impl Store {
    /// The store's position, if both coordinates are present and finite.
    ///
    /// Out-of-range values are passed through; the map widget decides how to
    /// draw them.
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        let position = LatLng {
            lat: self.lat?,
            lng: self.lng?,
        };
        (position.lat.is_finite() && position.lng.is_finite()).then_some(position)
    }

    /// Case-insensitive substring match against name or address.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.address.to_lowercase().contains(&needle)
    }
}

/// Coerce a JSON scalar into a store id.
///
/// Strings pass through; numbers are rendered the way a browser would print
/// them (`42`, `1.5`, and `3.0` as `3`). Every other JSON type yields `None`.
#[must_use]
pub fn coerce_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(number_to_id(n)),
        _ => None,
    }
}

fn number_to_id(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Integral floats below 2^53 print without a fraction.
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}
