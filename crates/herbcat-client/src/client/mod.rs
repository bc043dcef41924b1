//! HTTP client for the catalog backend's REST endpoints.

mod read;
mod write;

use std::time::Duration;

use herbcat_core::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::error::ClientError;

pub(super) const PRODUCTS_PATH: &str = "product";
pub(super) const CATEGORIES_PATH: &str = "product-category";

/// Client for the product and category endpoints.
///
/// Non-2xx responses become typed errors: 404 is [`ClientError::NotFound`],
/// 409 is [`ClientError::Conflict`], 429 is [`ClientError::RateLimited`].
/// Reads retry transient failures with exponential backoff; writes are sent
/// once.
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) api_token: Option<String>,
    /// Maximum number of retry attempts after the first failure.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient read errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joins append to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            api_token: None,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from application configuration, including the
    /// optional bearer token.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )?;
        Ok(client.with_api_token(config.api_token.clone()))
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    pub(super) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Maps a non-2xx response to its typed error; passes 2xx through.
pub(super) async fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = url.to_string();
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ClientError::RateLimited {
                url,
                retry_after_secs,
            })
        }
        StatusCode::NOT_FOUND => Err(ClientError::NotFound { url }),
        StatusCode::CONFLICT => {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Conflict {
                url,
                message: conflict_message(&body),
            })
        }
        _ => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        }),
    }
}

/// Pulls `message` out of a JSON error body, falling back to a generic text.
fn conflict_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "resource already exists".to_owned())
}
