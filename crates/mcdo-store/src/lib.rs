//! Local persistence for the visited set.
//!
//! [`KeyValueStore`] is the storage seam: a string-to-string map that can be
//! backed by a JSON file on disk ([`FileKvStore`]) or kept in memory
//! ([`MemoryKvStore`]). [`VisitedStore`] layers the visited-set semantics on
//! top and persists after every mutation.

pub mod kv;
pub mod visited;

use std::path::PathBuf;

use thiserror::Error;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use visited::VisitedStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
