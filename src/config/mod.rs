//! Configuration management for feedbell.
//!
//! Configuration is read from `~/.config/feedbell/config.toml` unless another
//! path is given. If the default file doesn't exist, a commented default
//! configuration with the stock feeds is created.

pub mod colors;

pub use colors::Color;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::FeedConfig;
use crate::image::ImageConfig;

/// Environment variable that overrides `discord.token`.
pub const TOKEN_ENV_VAR: &str = "FEEDBELL_DISCORD_TOKEN";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30 * 60 * 1000;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poll_interval_ms: u64,
    pub discord: DiscordConfig,
    pub notifier: NotifierConfig,
    pub image: ImageConfig,
    pub feeds: Vec<FeedConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            discord: DiscordConfig::default(),
            notifier: NotifierConfig::default(),
            image: ImageConfig::default(),
            feeds: Vec::new(),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token. Secret: never printed by `Debug`.
    pub token: String,
    pub api_base: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: "https://discord.com/api/v10".to_string(),
        }
    }
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("DiscordConfig")
            .field("token", &token)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Settings that shape the notification text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Feeds tagged with this value get the news announcement sentence.
    pub news_tag: String,
    /// Appended to the feed name in the author line.
    pub organization: String,
    pub author_icon_url: Option<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            news_tag: "@Cyber_News".to_string(),
            organization: "Weber State Cyber Club".to_string(),
            author_icon_url: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path.
    ///
    /// An explicit path must exist. The default path is created with the
    /// stock configuration when missing. Missing fields use default values.
    /// The token environment variable wins over the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    tracing::info!("Wrote default configuration to {}", default_path.display());
                }
                default_path
            }
        };

        let mut config = Self::from_file(&config_path)?;

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                config.discord.token = token.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/feedbell/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedbell").join("config.toml"))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }

        for feed in &self.feeds {
            url::Url::parse(&feed.url).map_err(|e| {
                ConfigError::Invalid(format!("feed {:?} has invalid url {:?}: {}", feed.name, feed.url, e))
            })?;

            if let Some(base_url) = &feed.base_url {
                url::Url::parse(base_url).map_err(|e| {
                    ConfigError::Invalid(format!(
                        "feed {:?} has invalid base_url {:?}: {}",
                        feed.name, base_url, e
                    ))
                })?;
            }

            if feed.channel_id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "feed {:?} has an empty channel_id",
                    feed.name
                )));
            }
        }

        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// The default config file content with comments.
    pub fn default_config_content() -> &'static str {
        r##"# feedbell configuration
#
# Colors can be specified as:
# - Named colors: Black, White, Red, Green, Blue, Yellow, Orange, Purple,
#   Gray, Blurple
# - Hex colors: "#RRGGBB" or "#RGB"

# How often every feed is checked, in milliseconds (30 minutes)
poll_interval_ms = 1800000

[discord]
# Bot token. Prefer the FEEDBELL_DISCORD_TOKEN environment variable.
token = ""
api_base = "https://discord.com/api/v10"

[notifier]
# Feeds using this tag get the news sentence instead of the default one
news_tag = "@Cyber_News"
# Author line reads "<feed name> Update | <organization>"
organization = "Weber State Cyber Club"

[image]
# Article page fetch timeout in seconds
timeout_secs = 10
user_agent = "Mozilla/5.0 (compatible; feedbell/0.1; +https://weber-cyber-club.github.io/)"

# Image selectors, tried in priority order. The first element of each
# selector is used when it has a non-empty src.
selectors = [
    "img.post-cover",
    ".post img",
    "article img",
    "img",
]

# Meta tags consulted last, in order. Their content attribute is used.
meta_selectors = [
    'meta[property="og:image"]',
    'meta[name="twitter:image"]',
]

[[feeds]]
name = "Announcement"
url = "https://weber-cyber-club.github.io/announcements/index.xml"
channel_id = "1443647723038572566"
color = "#492365"
tag = "@Website_Announcements"
footer_text = "New Announcement Posted!"
base_url = "https://weber-cyber-club.github.io"

[[feeds]]
name = "Lab"
url = "https://weber-cyber-club.github.io/labs/index.xml"
channel_id = "1443647723038572566"
color = "#492365"
tag = "@Labs_Role"
footer_text = "New Lab Available!"
base_url = "https://weber-cyber-club.github.io"

[[feeds]]
name = "Challenge"
url = "https://weber-cyber-club.github.io/challenges/index.xml"
channel_id = "1443647723038572566"
color = "#492365"
tag = "@Challenge_Role"
footer_text = "New Challenge Launched!"
base_url = "https://weber-cyber-club.github.io"

[[feeds]]
name = "Cyber News"
url = "https://www.bleepingcomputer.com/feed/"
channel_id = "1443705050437521418"
color = "#492365"
tag = "@Cyber_News"
footer_text = "New Cyber News!"
base_url = "https://www.bleepingcomputer.com"

[[feeds]]
name = "Cyber News"
url = "https://feeds.feedburner.com/TheHackersNews"
channel_id = "1443705050437521418"
color = "#492365"
tag = "@Cyber_News"
footer_text = "New Cyber News!"
base_url = "https://thehackernews.com"

[[feeds]]
name = "Cyber News"
url = "https://therecord.media/feed"
channel_id = "1443705050437521418"
color = "#492365"
tag = "@Cyber_News"
footer_text = "New Cyber News!"
base_url = "https://therecord.media"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
