use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of visited store ids. Membership only, no per-visit metadata.
///
/// Iteration and serialization order is the sorted id order, so the persisted
/// list is stable across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitedSet {
    ids: BTreeSet<String>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.ids.retain(keep);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// The ids as an ordered list, the shape used for storage and export.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_new_membership() {
        let mut set = VisitedSet::new();
        assert!(set.insert("1"));
        assert!(!set.insert("1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_as_sorted_array() {
        let set: VisitedSet = ["b", "a", "c"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a","b","c"]"#);
    }

    #[test]
    fn deserializes_duplicates_into_one_entry() {
        let set: VisitedSet = serde_json::from_str(r#"["1","1","2"]"#).unwrap();
        assert_eq!(set.to_vec(), vec!["1".to_string(), "2".to_string()]);
    }
}
