use herbcat_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("not found: {url}")]
    NotFound { url: String },

    /// HTTP 409. Callers show this as "already exists" rather than a
    /// generic failure.
    #[error("already exists: {message}")]
    Conflict { url: String, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// One side of the concurrent products/categories fetch failed, so no
    /// catalog was built.
    #[error("catalog fetch failed while loading {resource}: {source}")]
    FetchJoin {
        resource: &'static str,
        #[source]
        source: Box<ClientError>,
    },

    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// `true` for [`ClientError::Conflict`], including one wrapped in a
    /// [`ClientError::FetchJoin`].
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        match self {
            ClientError::Conflict { .. } => true,
            ClientError::FetchJoin { source, .. } => source.is_conflict(),
            _ => false,
        }
    }
}
