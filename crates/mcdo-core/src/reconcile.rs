//! One-shot cleanup of visited ids that no longer exist in the catalog.

use std::collections::HashSet;

use crate::store::Store;
use crate::visited::VisitedSet;

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Catalog or visited set was empty, so nothing was compared.
    Skipped,
    /// Every visited id is still in the catalog.
    Unchanged,
    /// These ids were dropped from the visited set.
    Pruned { removed: Vec<String> },
}

impl Reconciliation {
    #[must_use]
    pub fn removed_count(&self) -> usize {
        match self {
            Reconciliation::Pruned { removed } => removed.len(),
            Reconciliation::Skipped | Reconciliation::Unchanged => 0,
        }
    }
}

/// Remove visited ids that are absent from `catalog`.
///
/// An empty catalog never prunes anything: it most likely means the feed
/// failed to load, not that every store closed. Never adds ids.
pub fn reconcile(catalog: &[Store], visited: &mut VisitedSet) -> Reconciliation {
    if catalog.is_empty() || visited.is_empty() {
        return Reconciliation::Skipped;
    }

    let known: HashSet<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
    let removed: Vec<String> = visited
        .iter()
        .filter(|id| !known.contains(id))
        .map(str::to_owned)
        .collect();

    if removed.is_empty() {
        return Reconciliation::Unchanged;
    }

    visited.retain(|id| known.contains(id.as_str()));
    Reconciliation::Pruned { removed }
}
