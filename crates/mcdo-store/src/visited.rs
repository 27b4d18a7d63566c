//! The persisted visited set.

use mcdo_core::{
    apply_import, reconcile, ImportBatch, ImportReport, Reconciliation, Store, VisitedSet,
};

use crate::kv::KeyValueStore;
use crate::StoreError;

/// Visited ids mirrored into a [`KeyValueStore`] under one fixed key.
///
/// Every mutating call builds the next set, writes it, and only then swaps it
/// in, so once a call returns `Ok` storage holds exactly the in-memory set and
/// a failed write leaves both untouched.
#[derive(Debug)]
pub struct VisitedStore<S> {
    backend: S,
    key: String,
    ids: VisitedSet,
}

impl<S: KeyValueStore> VisitedStore<S> {
    /// Wrap `backend`. Starts empty; call [`VisitedStore::load`] to read it.
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            ids: VisitedSet::new(),
        }
    }

    /// Replace the in-memory set with the persisted one.
    ///
    /// A missing entry and an unparseable entry both load as the empty set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the backend itself cannot be read.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.ids = match self.backend.get(&self.key)? {
            None => VisitedSet::new(),
            Some(raw) => serde_json::from_str::<VisitedSet>(&raw).unwrap_or_else(|err| {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "persisted visited set is unreadable; starting empty"
                );
                VisitedSet::new()
            }),
        };
        tracing::debug!(key = %self.key, count = self.ids.len(), "loaded visited stores");
        Ok(())
    }

    /// Write the current set back to storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend write fails.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let raw = self.encode(&self.ids)?;
        self.backend.set(&self.key, &raw)
    }

    /// Mark `id` visited. Returns `true` if it was newly added.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the set is then unchanged.
    pub fn add(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut next = self.ids.clone();
        let added = next.insert(id);
        self.commit(next)?;
        Ok(added)
    }

    /// Mark `id` unvisited. Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the set is then unchanged.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut next = self.ids.clone();
        let removed = next.remove(id);
        self.commit(next)?;
        Ok(removed)
    }

    /// Forget every visit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the set is then unchanged.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(VisitedSet::new())
    }

    /// Merge an already-validated import batch and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the set is then unchanged.
    pub fn import(&mut self, batch: &ImportBatch) -> Result<ImportReport, StoreError> {
        let mut next = self.ids.clone();
        let report = apply_import(batch, &mut next);
        self.commit(next)?;
        Ok(report)
    }

    /// Drop ids missing from `catalog`, persisting only if something changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the set is then unchanged.
    pub fn reconcile(&mut self, catalog: &[Store]) -> Result<Reconciliation, StoreError> {
        let mut next = self.ids.clone();
        let outcome = reconcile(catalog, &mut next);
        if outcome.removed_count() > 0 {
            self.commit(next)?;
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &VisitedSet {
        &self.ids
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn commit(&mut self, next: VisitedSet) -> Result<(), StoreError> {
        let raw = self.encode(&next)?;
        self.backend.set(&self.key, &raw)?;
        self.ids = next;
        Ok(())
    }

    fn encode(&self, ids: &VisitedSet) -> Result<String, StoreError> {
        serde_json::to_string(ids).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "visited_test.rs"]
mod tests;
