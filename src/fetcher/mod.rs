pub mod http_fetcher;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::FetchError;
use crate::domain::FeedItem;

/// Retrieves a feed and returns its items newest first.
#[async_trait]
pub trait FeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FetchError>;
}

/// Retrieves the raw markup of a web page.
#[async_trait]
pub trait MarkupFetcher {
    async fn fetch_markup(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<String, FetchError>;
}
