use thiserror::Error;

/// Errors returned while loading the store catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not a JSON array of store records.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
