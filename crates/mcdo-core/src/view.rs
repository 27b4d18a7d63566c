//! Ephemeral presentation state: which view is active and the current filter.

/// The two mutually exclusive presentations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Map,
    List,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Map => ViewMode::List,
            ViewMode::List => ViewMode::Map,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Map => write!(f, "map"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

/// Not persisted; every session starts from [`ViewState::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub search_term: String,
    pub show_unvisited: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Map,
            search_term: String::new(),
            show_unvisited: true,
        }
    }
}

impl ViewState {
    /// Switch presentation, leaving the filter and visibility toggle alone.
    /// Returns `true` if the mode actually changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_show_unvisited(&mut self, show: bool) {
        self.show_unvisited = show;
    }

    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_map_with_everything_shown() {
        let view = ViewState::default();
        assert_eq!(view.mode, ViewMode::Map);
        assert!(view.search_term.is_empty());
        assert!(view.show_unvisited);
    }

    #[test]
    fn switching_mode_keeps_filter() {
        let mut view = ViewState::default();
        view.set_search_term("shibuya");
        view.set_show_unvisited(false);

        assert!(view.set_mode(ViewMode::List));
        assert_eq!(view.search_term, "shibuya");
        assert!(!view.show_unvisited);

        assert!(!view.set_mode(ViewMode::List), "same mode is not a change");
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(ViewMode::Map.toggled(), ViewMode::List);
        assert_eq!(ViewMode::List.toggled(), ViewMode::Map);
    }
}
