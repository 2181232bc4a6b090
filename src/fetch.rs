//! Single-item icon retrieval and outcome classification.

use crate::config::FetchConfig;
use crate::error::Result;
use crate::types::{FetchOutcome, WorkItem};

/// Abstraction over icon retrieval, enabling testability.
///
/// Implementations fold every per-item failure into [`FetchOutcome`]. An
/// `Err` means something went wrong outside the item's own fetch (the kind of
/// failure that should not be retried on the next item either) and aborts the
/// whole batch.
#[async_trait::async_trait]
pub trait IconFetcher: Send + Sync {
    /// Attempt to retrieve the icon for `item` exactly once
    async fn fetch(&self, item: &WorkItem) -> Result<FetchOutcome>;
}

/// Build the request URL by appending `icon_path` to the item's base URL verbatim.
///
/// ```
/// use favicon_dl::fetch::icon_url;
///
/// assert_eq!(icon_url("https://example.com/", "favicon.ico"), "https://example.com/favicon.ico");
/// assert_eq!(icon_url("https://example.com", "favicon.ico"), "https://example.comfavicon.ico");
/// ```
pub fn icon_url(base: &str, icon_path: &str) -> String {
    let mut url = String::with_capacity(base.len() + icon_path.len());
    url.push_str(base);
    url.push_str(icon_path);
    url
}

/// Production [`IconFetcher`] issuing one HTTP GET per item.
///
/// Redirects and timeouts are left at reqwest's defaults.
pub struct HttpIconFetcher {
    client: reqwest::Client,
    icon_path: String,
}

impl HttpIconFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    /// Returns [`Error::Network`](crate::Error::Network) if the HTTP client
    /// cannot be created (e.g. a user agent that is not a valid header value)
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, config.icon_path.clone()))
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::Client, icon_path: impl Into<String>) -> Self {
        Self {
            client,
            icon_path: icon_path.into(),
        }
    }

    async fn download(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("timed out fetching '{}'", url)
                } else if e.is_connect() {
                    format!("connection failed for '{}': {}", url, e)
                } else if e.is_builder() {
                    format!("invalid URL '{}': {}", url, e)
                } else {
                    format!("request to '{}' failed: {}", url, e)
                };
                return FetchOutcome::Error(reason);
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }
        if !status.is_success() {
            return FetchOutcome::Error(format!("HTTP status {} for '{}'", status, url));
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::Success(body.to_vec()),
            Err(e) => FetchOutcome::Error(format!("failed to read body from '{}': {}", url, e)),
        }
    }
}

#[async_trait::async_trait]
impl IconFetcher for HttpIconFetcher {
    async fn fetch(&self, item: &WorkItem) -> Result<FetchOutcome> {
        let url = icon_url(&item.url, &self.icon_path);
        tracing::debug!(item = %item.id, title = %item.title, url = %url, "downloading icon");

        let outcome = self.download(&url).await;
        match &outcome {
            FetchOutcome::Success(data) => {
                tracing::debug!(item = %item.id, bytes = data.len(), "icon downloaded");
            }
            FetchOutcome::NotFound => {
                tracing::debug!(item = %item.id, url = %url, "no icon at url");
            }
            FetchOutcome::Error(reason) => {
                tracing::warn!(item = %item.id, error = %reason, "failed to download icon");
            }
        }
        Ok(outcome)
    }
}
