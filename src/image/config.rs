use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for cover image resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Resolve images at all (default: true)
    pub enabled: bool,

    /// Article page fetch timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// User agent sent with article page requests
    pub user_agent: String,

    /// CSS selectors for `<img>` elements, in priority order. Only the first
    /// element each selector matches is considered, via its `src`.
    pub selectors: Vec<String>,

    /// CSS selectors for `<meta>` tags consulted after `selectors`, via `content`
    pub meta_selectors: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; feedbell/0.1; +https://weber-cyber-club.github.io/)"
                .to_string(),
            selectors: vec![
                "img.post-cover".to_string(),
                ".post img".to_string(),
                "article img".to_string(),
                "img".to_string(),
            ],
            meta_selectors: vec![
                "meta[property=\"og:image\"]".to_string(),
                "meta[name=\"twitter:image\"]".to_string(),
            ],
        }
    }
}

impl ImageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
