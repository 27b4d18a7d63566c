//! HTTP client for the store location feed.

use std::time::Duration;

use mcdo_core::Store;
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::normalize::normalize_catalog;
use crate::types::RawStoreRecord;
use crate::CatalogSource;

/// Fetches the whole catalog with one `GET`.
///
/// No retries: a failed fetch is reported to the caller, who decides what to
/// tell the user.
pub struct CatalogClient {
    client: Client,
    url: Url,
}

impl CatalogClient {
    /// Creates a client for the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if `url` does not parse, or
    /// [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(url).map_err(|e| CatalogError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: parsed,
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads and normalizes the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::UnexpectedStatus`] for any non-2xx response.
    /// - [`CatalogError::Deserialize`] if the body is not a JSON array of
    ///   store records.
    pub async fn fetch_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let records = self.fetch_raw().await?;
        let total = records.len();
        let stores = normalize_catalog(records);
        tracing::info!(
            url = %self.url,
            count = stores.len(),
            dropped = total - stores.len(),
            "loaded store catalog"
        );
        Ok(stores)
    }

    /// Downloads the feed without normalizing it.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_stores`].
    pub async fn fetch_raw(&self) -> Result<Vec<RawStoreRecord>, CatalogError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<RawStoreRecord>>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("store catalog from {}", self.url),
            source: e,
        })
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_stores(&self) -> Result<Vec<Store>, CatalogError> {
        CatalogClient::fetch_stores(self).await
    }
}
