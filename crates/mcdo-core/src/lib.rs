//! Domain model for the visited-store tracker.
//!
//! Everything in this crate is pure data and pure functions: the store
//! catalog shape, the visited set, the view state, and the filtering,
//! reconciliation and import/export rules that both presentations share.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod reconcile;
pub mod store;
pub mod transfer;
pub mod view;
pub mod visited;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, MapDefaults};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{is_visible, visible_stores};
pub use reconcile::{reconcile, Reconciliation};
pub use store::{coerce_id, LatLng, Store};
pub use transfer::{
    apply_import, export_file_name, export_visited, parse_import, ImportBatch, ImportFile,
    ImportReport, TransferError,
};
pub use view::{ViewMode, ViewState};
pub use visited::VisitedSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
