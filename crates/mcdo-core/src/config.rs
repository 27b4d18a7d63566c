use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment, MapDefaults};
use crate::store::LatLng;
use crate::ConfigError;

pub const DEFAULT_CATALOG_URL: &str =
    "https://k1832.github.io/mcdo-api/api/v1/store-location.json";

/// Storage key of the visited set. The `_jp` suffix keeps this dataset apart
/// from other regional variants sharing the same storage.
pub const DEFAULT_STORAGE_KEY: &str = "visitedMcDonaldsIds_jp";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<f64, ConfigError> {
        parse_var::<f64>(var, &or_default(var, default))
    };

    let env = parse_environment(&or_default("MCDO_ENV", "development"))?;
    let log_level = or_default("MCDO_LOG_LEVEL", "info");
    let catalog_url = or_default("MCDO_CATALOG_URL", DEFAULT_CATALOG_URL);
    let storage_path = PathBuf::from(or_default("MCDO_STORAGE_PATH", "./data/storage.json"));
    let storage_key = or_default("MCDO_STORAGE_KEY", DEFAULT_STORAGE_KEY);
    let request_timeout_secs = parse_var::<u64>(
        "MCDO_REQUEST_TIMEOUT_SECS",
        &or_default("MCDO_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("MCDO_USER_AGENT", "mcdo-tracker/0.1 (visit-tracker)");
    let export_dir = PathBuf::from(or_default("MCDO_EXPORT_DIR", "."));

    let defaults = MapDefaults::default();
    let center = LatLng {
        lat: parse("MCDO_MAP_CENTER_LAT", &defaults.center.lat.to_string())?,
        lng: parse("MCDO_MAP_CENTER_LNG", &defaults.center.lng.to_string())?,
    };
    if !center.is_valid() {
        let var = if center.lat.is_finite() && (-90.0..=90.0).contains(&center.lat) {
            "MCDO_MAP_CENTER_LNG"
        } else {
            "MCDO_MAP_CENTER_LAT"
        };
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("map centre {center} is outside the valid range"),
        });
    }
    let initial_zoom = parse_var::<u8>(
        "MCDO_MAP_INITIAL_ZOOM",
        &or_default("MCDO_MAP_INITIAL_ZOOM", &defaults.initial_zoom.to_string()),
    )?;
    let focus_zoom = parse_var::<u8>(
        "MCDO_MAP_FOCUS_ZOOM",
        &or_default("MCDO_MAP_FOCUS_ZOOM", &defaults.focus_zoom.to_string()),
    )?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_url,
        storage_path,
        storage_key,
        request_timeout_secs,
        user_agent,
        export_dir,
        map: MapDefaults {
            center,
            initial_zoom,
            focus_zoom,
        },
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MCDO_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
