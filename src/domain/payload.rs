use chrono::{DateTime, Utc};

use crate::config::Color;

/// Author line shown above the notification title.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Platform-neutral notification for a single announced item.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    /// Plain message text sent alongside the card, including the mention tag.
    pub content: String,
    pub title: String,
    pub link: Option<String>,
    pub author: Author,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub footer_text: String,
    pub color: Color,
}
