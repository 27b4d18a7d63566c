//! Visibility rule shared by the map and list presentations.

use crate::store::Store;
use crate::view::ViewState;
use crate::visited::VisitedSet;

/// A store is visible when it passes the visited toggle and the search term.
///
/// `show_unvisited == false` hides every store not in `visited`; a non-empty
/// search term must occur in the name or address, ignoring case.
#[must_use]
pub fn is_visible(store: &Store, visited: &VisitedSet, view: &ViewState) -> bool {
    (view.show_unvisited || visited.contains(&store.id)) && store.matches_term(&view.search_term)
}

/// Stores from `catalog` that are visible under `view`, in catalog order.
pub fn visible_stores<'a>(
    catalog: &'a [Store],
    visited: &'a VisitedSet,
    view: &'a ViewState,
) -> impl Iterator<Item = &'a Store> + 'a {
    catalog
        .iter()
        .filter(move |store| is_visible(store, visited, view))
}
