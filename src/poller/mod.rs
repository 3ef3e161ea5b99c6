//! One polling pass over the configured feeds.
//!
//! ```text
//! FeedFetcher → FeedState::detect → Announcer (lookup → image → compose → send) → FeedState::record
//! ```
//!
//! Feeds are processed sequentially in declaration order. A failing feed or
//! delivery is logged and skipped; it never stops the pass.

mod state;

pub use state::{Change, FeedState};

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app::DeliveryError;
use crate::domain::{FeedConfig, FeedItem};
use crate::fetcher::FeedFetcher;
use crate::image::ImageResolver;
use crate::notifier::{Delivery, NotificationComposer};

/// Delivers one item: destination lookup, image resolution, composition, send.
pub struct Announcer {
    delivery: Arc<dyn Delivery + Send + Sync>,
    images: ImageResolver,
    composer: NotificationComposer,
}

impl Announcer {
    pub fn new(
        delivery: Arc<dyn Delivery + Send + Sync>,
        images: ImageResolver,
        composer: NotificationComposer,
    ) -> Self {
        Self {
            delivery,
            images,
            composer,
        }
    }

    pub async fn announce(&self, item: &FeedItem, feed: &FeedConfig) -> Result<(), DeliveryError> {
        let destination = self
            .delivery
            .resolve(&feed.channel_id)
            .await?
            .ok_or_else(|| DeliveryError::DestinationNotFound(feed.channel_id.clone()))?;

        let image_url = self
            .images
            .resolve(item.link.as_deref(), feed.base_url.as_deref())
            .await;
        if let Some(url) = &image_url {
            info!("Found image for {}: {}", feed.name, url);
        }

        let payload = self.composer.compose(item, feed, image_url);
        self.delivery.send(&destination, &payload).await?;

        info!("Announced {}: {:?}", feed.name, item.title);
        Ok(())
    }
}

/// Totals for one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub feeds: usize,
    pub announced: usize,
    pub failed_feeds: usize,
    pub failed_deliveries: usize,
}

pub struct FeedPoller {
    feeds: Vec<FeedConfig>,
    fetcher: Arc<dyn FeedFetcher + Send + Sync>,
    announcer: Announcer,
    state: FeedState,
}

impl FeedPoller {
    pub fn new(
        feeds: Vec<FeedConfig>,
        fetcher: Arc<dyn FeedFetcher + Send + Sync>,
        announcer: Announcer,
    ) -> Self {
        Self {
            feeds,
            fetcher,
            announcer,
            state: FeedState::new(),
        }
    }

    /// Start from a known state instead of an empty one.
    pub fn with_state(mut self, state: FeedState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn feeds(&self) -> &[FeedConfig] {
        &self.feeds
    }

    pub async fn poll_once(&mut self) -> PassSummary {
        let mut summary = PassSummary {
            feeds: self.feeds.len(),
            ..Default::default()
        };

        for feed in &self.feeds {
            info!("Checking feed: {} ({})", feed.name, feed.url);

            let fetched = match self.fetcher.fetch(&feed.url).await {
                Ok(items) => items,
                Err(e) => {
                    error!("Error fetching or parsing {} feed: {}", feed.name, e);
                    summary.failed_feeds += 1;
                    continue;
                }
            };

            let outcome = process_feed(&mut self.state, &self.announcer, feed, &fetched).await;
            summary.announced += outcome.announced;
            summary.failed_deliveries += outcome.failed;
        }

        summary
    }
}

#[derive(Debug, Default)]
struct FeedOutcome {
    announced: usize,
    failed: usize,
}

async fn process_feed(
    state: &mut FeedState,
    announcer: &Announcer,
    feed: &FeedConfig,
    fetched: &[FeedItem],
) -> FeedOutcome {
    let change = state.detect(&feed.url, fetched);

    match &change {
        Change::Empty => {
            warn!("{} feed is empty", feed.name);
            return FeedOutcome::default();
        }
        Change::Unchanged => {
            info!(
                "No new updates for {} since: {:?}",
                feed.name,
                state.last_title(&feed.url).unwrap_or_default()
            );
            return FeedOutcome::default();
        }
        Change::Initialized(item) => {
            info!("Initializing {}. Last announced post: {:?}", feed.name, item.title);
        }
        Change::New(items) => {
            info!("{} new update(s) found for {}", items.len(), feed.name);
        }
    }

    let mut outcome = FeedOutcome::default();
    for item in change.items() {
        match announcer.announce(item, feed).await {
            Ok(()) => outcome.announced += 1,
            Err(e) => {
                error!(
                    "Failed to send announcement for {} post {:?}: {}",
                    feed.name, item.title, e
                );
                outcome.failed += 1;
            }
        }
    }

    // Recorded even when deliveries failed, so nothing is announced twice.
    state.record(&feed.url, fetched);
    outcome
}
