use serde::{Deserialize, Serialize};

use crate::config::Color;

/// Static description of one monitored feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Display name, used in logs, the author line and the default message.
    pub name: String,
    /// Feed source URL. Also the key for change-detection state.
    pub url: String,
    /// Destination (Discord channel) identifier.
    pub channel_id: String,
    #[serde(default)]
    pub color: Color,
    /// Mention tag placed at the start of the message text.
    pub tag: String,
    pub footer_text: String,
    /// Base URL used to absolutize root-relative image paths.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl FeedConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            channel_id: channel_id.into(),
            color: Color::default(),
            tag: String::new(),
            footer_text: String::new(),
            base_url: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_footer(mut self, footer_text: impl Into<String>) -> Self {
        self.footer_text = footer_text.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
