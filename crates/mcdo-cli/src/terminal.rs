//! Terminal front end for the tracker.
//!
//! Map and list output is buffered so the command decides what to print once
//! the session has settled. Notices go to stdout, alerts to stderr.

use std::io::{BufRead, Write};
use std::path::Path;

use mcdo_core::LatLng;
use mcdo_tracker::{Bounds, ListRow, ListSurface, MapSurface, Marker, Notifier};

/// Where the map is currently looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Camera {
    At { center: LatLng, zoom: u8 },
    Fitted(Bounds),
}

#[derive(Debug, Default)]
pub(crate) struct TerminalUi {
    auto_confirm: bool,
    pub(crate) markers: Vec<Marker>,
    pub(crate) rows: Vec<ListRow>,
    pub(crate) camera: Option<Camera>,
    pub(crate) open_popup: Option<String>,
}

impl TerminalUi {
    pub(crate) fn new(auto_confirm: bool) -> Self {
        Self {
            auto_confirm,
            ..Self::default()
        }
    }
}

impl MapSurface for TerminalUi {
    fn set_map_visible(&mut self, _visible: bool) {}

    fn invalidate_size(&mut self) {}

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.camera = Some(Camera::At { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.camera = Some(Camera::Fitted(*bounds));
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn update_marker(&mut self, marker: &Marker) {
        if let Some(existing) = self
            .markers
            .iter_mut()
            .find(|m| m.store_id == marker.store_id)
        {
            *existing = marker.clone();
        }
    }

    fn open_popup(&mut self, store_id: &str) {
        self.open_popup = Some(store_id.to_owned());
    }

    fn close_popup(&mut self) {
        self.open_popup = None;
    }
}

impl ListSurface for TerminalUi {
    fn set_list_visible(&mut self, _visible: bool) {}

    fn show_rows(&mut self, rows: &[ListRow]) {
        self.rows = rows.to_vec();
    }
}

impl Notifier for TerminalUi {
    fn alert(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn notice(&mut self, message: &str) {
        println!("{message}");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.auto_confirm {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        if std::io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation; treating as no");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Content type to declare for `path`, judged by its extension.
pub(crate) fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}
