//! List presentation: one row per visible store.

use mcdo_core::{visible_stores, Store, ViewState, VisitedSet};

use crate::actions::Action;

/// Shown in place of an empty address.
pub const ADDRESS_PLACEHOLDER: &str = "(no address)";

/// Operations the tracker needs from a list widget.
pub trait ListSurface {
    fn set_list_visible(&mut self, visible: bool);

    /// Replace every row.
    fn show_rows(&mut self, rows: &[ListRow]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub store_id: String,
    pub name: String,
    pub address: String,
    pub visited: bool,
    pub toggle: Action,
    pub show_on_map: Action,
}

impl ListRow {
    #[must_use]
    pub fn for_store(store: &Store, visited: bool) -> Self {
        let address = if store.address.is_empty() {
            ADDRESS_PLACEHOLDER.to_owned()
        } else {
            store.address.clone()
        };
        Self {
            store_id: store.id.clone(),
            name: store.name.clone(),
            address,
            visited,
            toggle: Action::toggle_for(&store.id, visited),
            show_on_map: Action::ShowOnMap(store.id.clone()),
        }
    }
}

/// Rows for every visible store, in catalog order. Unlike the map, stores
/// without coordinates are listed too.
#[must_use]
pub fn build_rows(catalog: &[Store], visited: &VisitedSet, view: &ViewState) -> Vec<ListRow> {
    visible_stores(catalog, visited, view)
        .map(|store| ListRow::for_store(store, visited.contains(&store.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;

    #[test]
    fn empty_address_gets_placeholder() {
        let row = ListRow::for_store(&store("1", "Shibuya", 35.0, 139.0), false);
        assert_eq!(row.address, ADDRESS_PLACEHOLDER);
        assert_eq!(row.toggle, Action::MarkVisited("1".to_string()));
        assert_eq!(row.show_on_map, Action::ShowOnMap("1".to_string()));
    }

    #[test]
    fn visited_row_offers_undo() {
        let mut s = store("1", "Shibuya", 35.0, 139.0);
        s.address = "Tokyo".to_string();
        let row = ListRow::for_store(&s, true);
        assert_eq!(row.address, "Tokyo");
        assert!(row.visited);
        assert_eq!(row.toggle, Action::MarkUnvisited("1".to_string()));
    }

    #[test]
    fn rows_include_stores_without_coordinates() {
        let mut broken = store("2", "Broken", 0.0, 0.0);
        broken.lat = None;
        let catalog = vec![store("1", "Fine", 35.0, 139.0), broken];

        let rows = build_rows(&catalog, &VisitedSet::new(), &ViewState::default());

        let ids: Vec<&str> = rows.iter().map(|r| r.store_id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }
}
