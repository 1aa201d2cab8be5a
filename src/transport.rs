//! Fetching event-list fragments from the feed server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::ServerConfig;
use crate::page::markers::{AJAX_HEADER, AJAX_HEADER_VALUE};

/// Why a fragment could not be fetched. None of these are fatal to the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to '{url}' failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server answered {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from '{url}': {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Short kind string for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Status { .. } => "status",
            FetchError::Body { .. } => "body",
        }
    }
}

/// Source of feed markup.
///
/// `fetch_fragment` is called with the partial-fragment URL; `fetch_page`
/// with an address-bar URL for the full document.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch_fragment(&self, url: &Url) -> Result<String, FetchError>;

    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, url: &Url, ajax: bool) -> Result<String, FetchError> {
        let mut request = self.client.get(url.clone());
        if ajax {
            request = request.header(AJAX_HEADER, AJAX_HEADER_VALUE);
        }

        let response = request.send().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch_fragment(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!(%url, "fetching feed fragment");
        self.get(url, true).await
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!(%url, "fetching feed page");
        self.get(url, false).await
    }
}
