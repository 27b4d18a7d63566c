//! Recording front end for unit tests.

use std::collections::BTreeMap;

use mcdo_core::{LatLng, Store};

use crate::list::{ListRow, ListSurface};
use crate::map::{Bounds, MapSurface, Marker};
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UiEvent {
    MapVisible(bool),
    ListVisible(bool),
    InvalidateSize,
    SetView { center: LatLng, zoom: u8 },
    FitBounds(Bounds),
    ClearMarkers,
    AddMarker(String),
    UpdateMarker(String),
    OpenPopup(String),
    ClosePopup,
    ShowRows(usize),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingUi {
    pub events: Vec<UiEvent>,
    pub markers: BTreeMap<String, Marker>,
    pub rows: Vec<ListRow>,
    pub alerts: Vec<String>,
    pub notices: Vec<String>,
    pub prompts: Vec<String>,
    pub confirm_answer: bool,
}

impl RecordingUi {
    pub fn count(&self, pred: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }

    pub fn row_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.rows.iter().map(|r| r.store_id.clone()).collect();
        ids.sort();
        ids
    }
}

impl MapSurface for RecordingUi {
    fn set_map_visible(&mut self, visible: bool) {
        self.events.push(UiEvent::MapVisible(visible));
    }

    fn invalidate_size(&mut self) {
        self.events.push(UiEvent::InvalidateSize);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.events.push(UiEvent::SetView { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.events.push(UiEvent::FitBounds(*bounds));
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.events.push(UiEvent::ClearMarkers);
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.insert(marker.store_id.clone(), marker.clone());
        self.events.push(UiEvent::AddMarker(marker.store_id.clone()));
    }

    fn update_marker(&mut self, marker: &Marker) {
        self.markers.insert(marker.store_id.clone(), marker.clone());
        self.events
            .push(UiEvent::UpdateMarker(marker.store_id.clone()));
    }

    fn open_popup(&mut self, store_id: &str) {
        self.events.push(UiEvent::OpenPopup(store_id.to_owned()));
    }

    fn close_popup(&mut self) {
        self.events.push(UiEvent::ClosePopup);
    }
}

impl ListSurface for RecordingUi {
    fn set_list_visible(&mut self, visible: bool) {
        self.events.push(UiEvent::ListVisible(visible));
    }

    fn show_rows(&mut self, rows: &[ListRow]) {
        self.rows = rows.to_vec();
        self.events.push(UiEvent::ShowRows(rows.len()));
    }
}

impl Notifier for RecordingUi {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_owned());
        self.confirm_answer
    }
}

pub(crate) fn store(id: &str, name: &str, lat: f64, lng: f64) -> Store {
    Store {
        id: id.to_owned(),
        name: name.to_owned(),
        lat: Some(lat),
        lng: Some(lng),
        address: String::new(),
    }
}
