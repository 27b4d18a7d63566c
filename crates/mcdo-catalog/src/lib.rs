//! Loader for the remote store catalog feed.
//!
//! The feed is a single JSON array of store records. [`CatalogClient`] fetches
//! it and [`normalize_catalog`] turns raw records into [`mcdo_core::Store`]s.
//! Callers that only need "something that yields stores" depend on
//! [`CatalogSource`] instead of the HTTP client.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

use std::future::Future;

use mcdo_core::Store;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::{normalize_catalog, normalize_record};
pub use types::RawStoreRecord;

/// Anything that can produce the full store catalog.
///
/// A failed fetch returns `Err`; implementations never return a partial list.
pub trait CatalogSource {
    fn fetch_stores(&self) -> impl Future<Output = Result<Vec<Store>, CatalogError>> + Send;
}
