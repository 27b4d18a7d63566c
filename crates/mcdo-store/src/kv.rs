//! Key-value storage backends.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::StoreError;

/// A flat string-to-string store, the local-storage shape the tracker needs.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value. The write is
    /// durable once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend persisted as one JSON object file.
///
/// The whole map is rewritten on every `set`: contents go to a sibling
/// temporary file first and are then renamed over the target, so a crash
/// mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKvStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// A file that is not a JSON object of strings is moved aside to
    /// `<path>.corrupt` and the store starts empty, so the next write cannot
    /// clobber it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or a
    /// corrupt file cannot be moved aside.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    let aside = sibling(&path, ".corrupt");
                    tracing::warn!(
                        path = %path.display(),
                        moved_to = %aside.display(),
                        error = %err,
                        "storage file is unreadable; starting empty"
                    );
                    std::fs::rename(&path, &aside).map_err(|source| StoreError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "storage file not found; starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body =
            serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Encode {
                key: self.path.display().to_string(),
                source,
            })?;

        let tmp = sibling(&self.path, ".tmp");
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(err) = self.flush() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(prev) => self.entries.insert(key.to_owned(), prev),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush() {
            self.entries.insert(key.to_owned(), previous);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut kv = MemoryKvStore::new();
        assert_eq!(kv.get("k").unwrap(), None);
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        kv.remove("k").unwrap();
        assert_eq!(kv.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(kv.get("anything").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut kv = FileKvStore::open(&path).unwrap();
        kv.set("visited", r#"["1"]"#).unwrap();
        kv.set("other", "x").unwrap();
        drop(kv);

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("visited").unwrap().as_deref(), Some(r#"["1"]"#));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(
            !dir.path().join("nested").join("storage.json.tmp").exists(),
            "temporary file must be renamed away"
        );
    }

    #[test]
    fn file_store_truncated_file_opens_empty_and_is_kept_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let truncated = r#"{"visitedMcDonaldsIds_jp": ["1""#;
        std::fs::write(&path, truncated).unwrap();

        let mut kv = FileKvStore::open(&path).unwrap();
        assert_eq!(kv.get("visitedMcDonaldsIds_jp").unwrap(), None);

        let aside = dir.path().join("storage.json.corrupt");
        assert_eq!(std::fs::read_to_string(&aside).unwrap(), truncated);

        kv.set("visitedMcDonaldsIds_jp", r#"["2"]"#).unwrap();
        assert_eq!(std::fs::read_to_string(&aside).unwrap(), truncated);
    }

    #[test]
    fn file_store_wrong_shape_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"["not", "an", "object"]"#).unwrap();

        let kv = FileKvStore::open(&path).unwrap();
        assert_eq!(kv.get("anything").unwrap(), None);
        assert!(dir.path().join("storage.json.corrupt").exists());
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut kv = FileKvStore::open(&path).unwrap();
        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), None);
    }
}
