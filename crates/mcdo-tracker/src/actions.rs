//! Per-store actions offered by the presentations.

use crate::error::TrackerError;

/// A user action bound to one store, carried by popups and list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MarkVisited(String),
    MarkUnvisited(String),
    ShowOnMap(String),
}

impl Action {
    /// The toggle offered for a store in the given state.
    #[must_use]
    pub fn toggle_for(store_id: &str, visited: bool) -> Self {
        if visited {
            Action::MarkUnvisited(store_id.to_owned())
        } else {
            Action::MarkVisited(store_id.to_owned())
        }
    }

    #[must_use]
    pub fn store_id(&self) -> &str {
        match self {
            Action::MarkVisited(id) | Action::MarkUnvisited(id) | Action::ShowOnMap(id) => id,
        }
    }

    /// Button text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Action::MarkVisited(_) => "Mark this store as visited!",
            Action::MarkUnvisited(_) => "Undo visit",
            Action::ShowOnMap(_) => "Show on map",
        }
    }
}

/// Capability handed to the front end for carrying out [`Action`]s.
pub trait StoreActions {
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the visited set cannot be persisted.
    fn mark_visited(&mut self, store_id: &str) -> Result<(), TrackerError>;

    /// # Errors
    ///
    /// Returns [`TrackerError`] if the visited set cannot be persisted.
    fn mark_unvisited(&mut self, store_id: &str) -> Result<(), TrackerError>;

    fn show_on_map(&mut self, store_id: &str);

    /// Carry out `action`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the visited set cannot be persisted.
    fn dispatch(&mut self, action: &Action) -> Result<(), TrackerError> {
        match action {
            Action::MarkVisited(id) => self.mark_visited(id),
            Action::MarkUnvisited(id) => self.mark_unvisited(id),
            Action::ShowOnMap(id) => {
                self.show_on_map(id);
                Ok(())
            }
        }
    }
}
