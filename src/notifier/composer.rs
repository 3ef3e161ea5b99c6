use chrono::{DateTime, Utc};

use crate::config::NotifierConfig;
use crate::domain::{Author, FeedConfig, FeedItem, NotificationPayload};

/// Longest excerpt, in characters, before truncation.
pub const EXCERPT_LIMIT: usize = 200;
pub const ELLIPSIS: &str = "...";
pub const EXCERPT_PLACEHOLDER: &str = "Click the link to read the full update!";

/// Builds the notification for one item of one feed.
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    config: NotifierConfig,
}

impl NotificationComposer {
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }

    pub fn compose(
        &self,
        item: &FeedItem,
        feed: &FeedConfig,
        image_url: Option<String>,
    ) -> NotificationPayload {
        self.compose_at(item, feed, image_url, Utc::now())
    }

    /// Same as [`compose`](Self::compose) with an explicit fallback timestamp.
    pub fn compose_at(
        &self,
        item: &FeedItem,
        feed: &FeedConfig,
        image_url: Option<String>,
        now: DateTime<Utc>,
    ) -> NotificationPayload {
        NotificationPayload {
            content: self.message_text(feed),
            title: item.display_title().to_string(),
            link: item.link.clone(),
            author: Author {
                name: format!("{} Update | {}", feed.name, self.config.organization),
                icon_url: self.config.author_icon_url.clone(),
            },
            excerpt: excerpt(item.summary.as_deref()),
            image_url,
            timestamp: item.published_at.unwrap_or(now),
            footer_text: feed.footer_text.clone(),
            color: feed.color,
        }
    }

    /// Message text, chosen by the feed's tag:
    ///
    /// | tag            | text                                                       |
    /// |----------------|------------------------------------------------------------|
    /// | the news tag   | `{tag} new Cyber News has been released on {base_url} !`   |
    /// | anything else  | `{tag} a new {name} has been posted to the website!`       |
    pub fn message_text(&self, feed: &FeedConfig) -> String {
        if feed.tag == self.config.news_tag {
            let site = feed.base_url.as_deref().unwrap_or(&feed.url);
            format!("{} new Cyber News has been released on {} !", feed.tag, site)
        } else {
            format!(
                "{} a new {} has been posted to the website!",
                feed.tag,
                feed.name.to_lowercase()
            )
        }
    }
}

/// Truncate a summary to [`EXCERPT_LIMIT`] characters.
///
/// Only truncated summaries get the ellipsis. Missing or blank summaries
/// become the placeholder.
pub fn excerpt(summary: Option<&str>) -> String {
    let Some(summary) = summary.map(str::trim).filter(|s| !s.is_empty()) else {
        return EXCERPT_PLACEHOLDER.to_string();
    };

    match summary.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}{}", &summary[..cut], ELLIPSIS),
        None => summary.to_string(),
    }
}
