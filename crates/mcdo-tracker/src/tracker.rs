//! The coordinating session object.

use chrono::NaiveDate;
use mcdo_catalog::CatalogSource;
use mcdo_core::{
    export_file_name, export_visited, parse_import, ImportFile, ImportReport, MapDefaults,
    Reconciliation, Store, ViewMode, ViewState, VisitedSet,
};
use mcdo_store::{KeyValueStore, VisitedStore};

use crate::actions::StoreActions;
use crate::error::TrackerError;
use crate::list::{build_rows, ListSurface};
use crate::map::{MapPresenter, MapSurface};
use crate::notify::Notifier;

pub const ERASE_PROMPT: &str = "Really erase the entire visit history for Japan?";

/// What [`Tracker::start`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub catalog_loaded: bool,
    pub store_count: usize,
    pub visited_count: usize,
    pub reconciliation: Reconciliation,
}

/// An export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Owns all session state and keeps both presentations in step with it.
///
/// `U` is the front end: one object acting as map widget, list widget and
/// notifier.
pub struct Tracker<S, U> {
    catalog: Vec<Store>,
    visited: VisitedStore<S>,
    view: ViewState,
    map: MapPresenter,
    map_defaults: MapDefaults,
    ui: U,
    reconciled: bool,
}

impl<S, U> Tracker<S, U>
where
    S: KeyValueStore,
    U: MapSurface + ListSurface + Notifier,
{
    pub fn new(visited: VisitedStore<S>, ui: U, map_defaults: MapDefaults) -> Self {
        Self {
            catalog: Vec::new(),
            visited,
            view: ViewState::default(),
            map: MapPresenter::new(map_defaults.focus_zoom),
            map_defaults,
            ui,
            reconciled: false,
        }
    }

    /// Start from `view` instead of the default view state.
    #[must_use]
    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    /// Load the visited set and the catalog, reconcile them once, and render.
    ///
    /// A failed catalog fetch is reported through [`Notifier::alert`] and the
    /// session continues with an empty catalog. The reconciliation notice, if
    /// any, is raised after the first render.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the storage backend cannot be read
    /// or the reconciled set cannot be written.
    pub async fn start<C: CatalogSource>(
        &mut self,
        source: &C,
    ) -> Result<StartupReport, TrackerError> {
        self.visited.load()?;
        let catalog_loaded = self.load_catalog(source).await;
        let reconciliation = self.reconcile_once()?;

        self.ui
            .set_view(self.map_defaults.center, self.map_defaults.initial_zoom);
        self.show_active_container();
        self.render();

        let removed = reconciliation.removed_count();
        if removed > 0 {
            self.ui.notice(&format!(
                "{removed} visited store(s) no longer exist and were removed from your history."
            ));
        }

        Ok(StartupReport {
            catalog_loaded,
            store_count: self.catalog.len(),
            visited_count: self.visited.len(),
            reconciliation,
        })
    }

    /// Fetch the catalog and replace the current one wholesale.
    ///
    /// On failure the current catalog is kept, the user is alerted, and
    /// `false` is returned. Does not reconcile or render.
    pub async fn load_catalog<C: CatalogSource>(&mut self, source: &C) -> bool {
        match source.fetch_stores().await {
            Ok(stores) => {
                tracing::info!(count = stores.len(), "store catalog replaced");
                self.catalog = stores;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "could not load store catalog");
                self.ui.alert(&format!(
                    "Could not load store data ({err}). The API may be down or the network unavailable."
                ));
                false
            }
        }
    }

    /// Fetch the catalog again and re-render. Reconciliation is not repeated.
    pub async fn reload_catalog<C: CatalogSource>(&mut self, source: &C) -> bool {
        let loaded = self.load_catalog(source).await;
        if loaded {
            self.render();
        }
        loaded
    }

    /// Run reconciliation the first time this is called in a session; later
    /// calls return [`Reconciliation::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the pruned set cannot be written.
    pub fn reconcile_once(&mut self) -> Result<Reconciliation, TrackerError> {
        if self.reconciled {
            return Ok(Reconciliation::Skipped);
        }
        self.reconciled = true;

        let outcome = self.visited.reconcile(&self.catalog)?;
        match &outcome {
            Reconciliation::Pruned { removed } => {
                tracing::info!(count = removed.len(), ids = ?removed, "pruned visited ids missing from catalog");
            }
            Reconciliation::Unchanged => tracing::debug!("visited set matches catalog"),
            Reconciliation::Skipped => {
                tracing::debug!(
                    stores = self.catalog.len(),
                    visited = self.visited.len(),
                    "reconciliation skipped"
                );
            }
        }
        Ok(outcome)
    }

    /// Switch presentation. Filter and visibility toggle carry over.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.view.set_mode(mode) {
            tracing::debug!(%mode, "switched view mode");
        }
        self.show_active_container();
        self.render();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.view.mode.toggled());
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
        self.render();
    }

    pub fn set_show_unvisited(&mut self, show: bool) {
        self.view.set_show_unvisited(show);
        self.render();
    }

    /// Fully re-render the active presentation.
    pub fn render(&mut self) {
        self.render_focused(None);
    }

    /// Ask for confirmation, then forget every visit.
    ///
    /// Returns `false` if the user declined, in which case nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the empty set cannot be written.
    pub fn erase_all(&mut self) -> Result<bool, TrackerError> {
        if !self.ui.confirm(ERASE_PROMPT) {
            tracing::debug!("erase declined");
            return Ok(false);
        }
        self.visited.clear()?;
        tracing::info!("erased all visit data");
        self.render();
        self.ui.notice("All visit data has been erased.");
        Ok(true)
    }

    /// Serialize the visited set for download on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Transfer`] if serialization fails.
    pub fn export(&self, date: NaiveDate) -> Result<ExportFile, TrackerError> {
        Ok(ExportFile {
            file_name: export_file_name(date),
            contents: export_visited(self.visited.ids())?,
        })
    }

    /// [`Tracker::export`] stamped with the local date.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Transfer`] if serialization fails.
    pub fn export_today(&self) -> Result<ExportFile, TrackerError> {
        self.export(chrono::Local::now().date_naive())
    }

    /// Merge ids from a user-selected file.
    ///
    /// A structurally invalid file is rejected with an alert and `Ok(None)`;
    /// nothing is changed in that case. Otherwise the set is persisted, the
    /// view re-rendered and the counts reported.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the merged set cannot be written.
    pub fn import(&mut self, file: &ImportFile) -> Result<Option<ImportReport>, TrackerError> {
        let batch = match parse_import(file) {
            Ok(batch) => batch,
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "import rejected");
                self.ui.alert(&format!("Import failed: {err}"));
                return Ok(None);
            }
        };

        let report = self.visited.import(&batch)?;
        tracing::info!(
            file = %file.name,
            read = report.read,
            added = report.added,
            skipped = report.skipped,
            "imported visited stores"
        );
        self.render();

        let mut message = format!(
            "Imported {} entries; {} new store(s) marked visited.",
            report.read, report.added
        );
        if report.skipped > 0 {
            message.push_str(&format!(" {} invalid entries were ignored.", report.skipped));
        }
        self.ui.notice(&message);
        Ok(Some(report))
    }

    #[must_use]
    pub fn catalog(&self) -> &[Store] {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self, id: &str) -> Option<&Store> {
        self.catalog.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        self.visited.ids()
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.has(id)
    }

    #[must_use]
    pub fn map(&self) -> &MapPresenter {
        &self.map
    }

    #[must_use]
    pub fn storage(&self) -> &VisitedStore<S> {
        &self.visited
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    fn show_active_container(&mut self) {
        let on_map = self.view.mode == ViewMode::Map;
        self.ui.set_map_visible(on_map);
        self.ui.set_list_visible(!on_map);
        if on_map {
            self.ui.invalidate_size();
        }
    }

    fn render_focused(&mut self, focus: Option<&str>) {
        match self.view.mode {
            ViewMode::Map => {
                self.map.render(
                    &mut self.ui,
                    &self.catalog,
                    self.visited.ids(),
                    &self.view,
                    focus,
                );
            }
            ViewMode::List => {
                let rows = build_rows(&self.catalog, self.visited.ids(), &self.view);
                self.ui.show_rows(&rows);
            }
        }
    }

    /// Bring the presentation in line after one store's visited state changed.
    ///
    /// On the map only that marker is restyled and the popup closed, so pan
    /// and zoom survive. The list has no such state and is re-rendered.
    fn after_toggle(&mut self, store_id: &str) {
        match self.view.mode {
            ViewMode::Map => {
                let visited = self.visited.has(store_id);
                if let Some(store) = self.catalog.iter().find(|s| s.id == store_id) {
                    self.map.refresh_marker(&mut self.ui, store, visited);
                }
                self.ui.close_popup();
            }
            ViewMode::List => self.render(),
        }
    }
}

impl<S, U> StoreActions for Tracker<S, U>
where
    S: KeyValueStore,
    U: MapSurface + ListSurface + Notifier,
{
    fn mark_visited(&mut self, store_id: &str) -> Result<(), TrackerError> {
        let added = self.visited.add(store_id)?;
        tracing::info!(id = store_id, added, "marked store visited");
        self.after_toggle(store_id);
        Ok(())
    }

    fn mark_unvisited(&mut self, store_id: &str) -> Result<(), TrackerError> {
        let removed = self.visited.remove(store_id)?;
        tracing::info!(id = store_id, removed, "marked store unvisited");
        self.after_toggle(store_id);
        Ok(())
    }

    fn show_on_map(&mut self, store_id: &str) {
        self.view.set_mode(ViewMode::Map);
        self.show_active_container();
        self.render_focused(Some(store_id));
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
