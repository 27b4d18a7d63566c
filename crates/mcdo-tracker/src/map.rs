//! Map presentation: markers for visible stores, popups, and viewport focus.
//!
//! The map widget itself is external and is driven through [`MapSurface`].
//! [`MapPresenter`] remembers which markers are on the surface so a single
//! store can be restyled in place without a full re-render, which would reset
//! the user's pan and zoom.

use std::collections::HashMap;

use mcdo_core::{visible_stores, LatLng, Store, ViewState, VisitedSet};

use crate::actions::Action;

/// Operations the tracker needs from a map widget.
pub trait MapSurface {
    fn set_map_visible(&mut self, visible: bool);

    /// Recompute the widget's size after its container was shown. Hidden
    /// containers report zero size to the widget.
    fn invalidate_size(&mut self);

    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn fit_bounds(&mut self, bounds: &Bounds);
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: &Marker);

    /// Replace icon and popup content of the marker with `marker.store_id`.
    fn update_marker(&mut self, marker: &Marker);

    fn open_popup(&mut self, store_id: &str);
    fn close_popup(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Red,
}

impl MarkerColor {
    /// Green for visited, red for not yet visited.
    #[must_use]
    pub fn for_visited(visited: bool) -> Self {
        if visited {
            MarkerColor::Green
        } else {
            MarkerColor::Red
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    /// `None` when the store has no address.
    pub address: Option<String>,
    pub status: &'static str,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub store_id: String,
    pub position: LatLng,
    pub color: MarkerColor,
    pub popup: Popup,
}

impl Marker {
    /// Marker for `store`, or `None` if it has no usable coordinates.
    #[must_use]
    pub fn for_store(store: &Store, visited: bool) -> Option<Self> {
        let position = store.position()?;
        Some(Self {
            store_id: store.id.clone(),
            position,
            color: MarkerColor::for_visited(visited),
            popup: Popup {
                title: store.name.clone(),
                address: (!store.address.is_empty()).then(|| store.address.clone()),
                status: if visited {
                    "You have visited this store!"
                } else {
                    "You have not visited this store yet."
                },
                action: Action::toggle_for(&store.id, visited),
            },
        })
    }
}

/// Axis-aligned box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest box enclosing every point; `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for p in points {
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
        }
        Some(bounds)
    }
}

/// Where the map should look after a full render.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    /// Leave pan and zoom alone.
    Unchanged,
    /// Zoom to one store and open its popup.
    Focus { store_id: String, center: LatLng },
    /// Fit all of these bounds into view.
    Fit(Bounds),
}

/// Markers for every visible store with usable coordinates, in catalog order.
///
/// Stores with missing or non-finite coordinates are skipped and logged;
/// they still appear in the list presentation.
#[must_use]
pub fn build_markers(catalog: &[Store], visited: &VisitedSet, view: &ViewState) -> Vec<Marker> {
    visible_stores(catalog, visited, view)
        .filter_map(|store| {
            let marker = Marker::for_store(store, visited.contains(&store.id));
            if marker.is_none() {
                tracing::warn!(
                    id = %store.id,
                    name = %store.name,
                    lat = ?store.lat,
                    lng = ?store.lng,
                    "invalid coordinates; store not shown on map"
                );
            }
            marker
        })
        .collect()
}

/// Decide the viewport after a full render.
///
/// An explicitly requested store wins whenever it has a marker. Otherwise,
/// with a non-empty search: one match is focused, several are fitted. Without
/// a search the viewport is left alone.
#[must_use]
pub fn plan_viewport(markers: &[Marker], view: &ViewState, focus: Option<&str>) -> Viewport {
    if let Some(id) = focus {
        if let Some(marker) = markers.iter().find(|m| m.store_id == id) {
            return Viewport::Focus {
                store_id: marker.store_id.clone(),
                center: marker.position,
            };
        }
        tracing::debug!(id, "requested store has no marker; falling back to search focus");
    }

    if !view.has_search() {
        return Viewport::Unchanged;
    }

    match markers {
        [] => Viewport::Unchanged,
        [only] => Viewport::Focus {
            store_id: only.store_id.clone(),
            center: only.position,
        },
        many => Bounds::enclosing(many.iter().map(|m| m.position))
            .map_or(Viewport::Unchanged, Viewport::Fit),
    }
}

/// Tracks the markers currently placed on a [`MapSurface`].
#[derive(Debug, Default)]
pub struct MapPresenter {
    focus_zoom: u8,
    markers: Vec<Marker>,
    index: HashMap<String, usize>,
}

impl MapPresenter {
    #[must_use]
    pub fn new(focus_zoom: u8) -> Self {
        Self {
            focus_zoom,
            ..Self::default()
        }
    }

    /// Replace every marker on `surface` with the currently visible stores,
    /// then move the viewport as [`plan_viewport`] decides. Returns the
    /// number of markers placed.
    pub fn render<M: MapSurface>(
        &mut self,
        surface: &mut M,
        catalog: &[Store],
        visited: &VisitedSet,
        view: &ViewState,
        focus: Option<&str>,
    ) -> usize {
        surface.clear_markers();
        self.markers.clear();
        self.index.clear();

        if catalog.is_empty() {
            tracing::warn!("no stores loaded; nothing to render on the map");
            return 0;
        }

        self.markers = build_markers(catalog, visited, view);
        for (i, marker) in self.markers.iter().enumerate() {
            surface.add_marker(marker);
            self.index.insert(marker.store_id.clone(), i);
        }

        match plan_viewport(&self.markers, view, focus) {
            Viewport::Unchanged => {}
            Viewport::Focus { store_id, center } => {
                surface.set_view(center, self.focus_zoom);
                surface.open_popup(&store_id);
            }
            Viewport::Fit(bounds) => surface.fit_bounds(&bounds),
        }

        tracing::debug!(count = self.markers.len(), "rendered map markers");
        self.markers.len()
    }

    /// Restyle the marker for `store` after its visited state changed.
    ///
    /// Touches only that marker; returns `false` if the store has no marker
    /// on the surface.
    pub fn refresh_marker<M: MapSurface>(
        &mut self,
        surface: &mut M,
        store: &Store,
        visited: bool,
    ) -> bool {
        let Some(&i) = self.index.get(&store.id) else {
            return false;
        };
        let Some(marker) = Marker::for_store(store, visited) else {
            return false;
        };
        surface.update_marker(&marker);
        self.markers[i] = marker;
        true
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn marker(&self, store_id: &str) -> Option<&Marker> {
        self.index.get(store_id).map(|&i| &self.markers[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
