use std::path::PathBuf;

use crate::store::LatLng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Initial viewport and focus behaviour for the map presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub center: LatLng,
    pub initial_zoom: u8,
    /// Zoom applied when the view auto-focuses a single store.
    pub focus_zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: LatLng {
                lat: 35.6895,
                lng: 139.6917,
            },
            initial_zoom: 10,
            focus_zoom: 16,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_url: String,
    pub storage_path: PathBuf,
    pub storage_key: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub export_dir: PathBuf,
    pub map: MapDefaults,
}
