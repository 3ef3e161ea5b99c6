use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::app::FetchError;
use crate::domain::FeedItem;
use crate::fetcher::{FeedFetcher, MarkupFetcher};
use crate::normalizer::Normalizer;

/// Default timeout for requests that don't set their own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed implementation of both fetcher traits.
pub struct HttpFetcher {
    client: Client,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            normalizer: Normalizer::new(),
        }
    }

    /// The shared HTTP client used for feeds, article pages and delivery.
    pub fn build_client() -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("feedbell/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        self.normalizer.normalize(&body)
    }
}

#[async_trait]
impl MarkupFetcher for HttpFetcher {
    async fn fetch_markup(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }
}
