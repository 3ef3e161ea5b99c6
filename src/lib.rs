//! # feedbell
//!
//! Polls a fixed set of RSS/Atom feeds and announces new items to Discord,
//! each with a cover image scraped from the linked article.
//!
//! ## Architecture
//!
//! ```text
//! Daemon → FeedPoller → FeedFetcher → FeedState → Announcer
//!                                                  ├─ Delivery::resolve
//!                                                  ├─ ImageResolver → MarkupFetcher
//!                                                  ├─ NotificationComposer
//!                                                  └─ Delivery::send
//! ```
//!
//! State is held in memory only; after a restart every feed announces its
//! newest item once and tracking resumes from there.
//!
//! ## Quick Start
//!
//! ```bash
//! # Writes ~/.config/feedbell/config.toml on first use
//! FEEDBELL_DISCORD_TOKEN=... feedbell run
//!
//! # Single pass
//! feedbell once
//!
//! # Check image extraction for an article
//! feedbell image https://example.org/posts/hello --base https://example.org
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration to the
/// HTTP fetcher and the Discord client.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// TOML configuration: feeds, interval, Discord, notifier and image settings.
pub mod config;

/// Scheduler: a pass on start, then one per interval until shutdown.
pub mod daemon;

/// Core domain models.
///
/// - [`FeedConfig`](domain::FeedConfig): a monitored feed
/// - [`FeedItem`](domain::FeedItem): an entry, identified by its title
/// - [`NotificationPayload`](domain::NotificationPayload): what gets delivered
pub mod domain;

/// HTTP fetching.
///
/// - [`FeedFetcher`](fetcher::FeedFetcher) and [`MarkupFetcher`](fetcher::MarkupFetcher): async traits
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation of both
pub mod fetcher;

/// Cover image resolution through an ordered selector fallback chain.
pub mod image;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0 into
/// [`FeedItem`](domain::FeedItem)s with plain-text summaries.
pub mod normalizer;

/// Notification composition and the Discord delivery client.
pub mod notifier;

/// Change detection and the polling pass.
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;
