//! Session coordinator for the visited-store tracker.
//!
//! [`Tracker`] owns the catalog, the persisted visited set and the view state,
//! and drives two presentations through front-end traits: a map
//! ([`MapSurface`]) and a list ([`ListSurface`]). User-facing messages go
//! through a [`Notifier`]. Presentations hand back [`Action`] values rather
//! than calling into the tracker, and the front end dispatches them through
//! [`StoreActions`].

pub mod actions;
pub mod error;
pub mod list;
pub mod map;
pub mod notify;
pub mod tracker;

pub use actions::{Action, StoreActions};
pub use error::TrackerError;
pub use list::{build_rows, ListRow, ListSurface, ADDRESS_PLACEHOLDER};
pub use map::{
    build_markers, plan_viewport, Bounds, MapPresenter, MapSurface, Marker, MarkerColor, Popup,
    Viewport,
};
pub use notify::Notifier;
pub use tracker::{ExportFile, StartupReport, Tracker};

#[cfg(test)]
mod test_support;
