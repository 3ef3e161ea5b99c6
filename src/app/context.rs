use std::sync::Arc;

use crate::app::error::{FeedbellError, Result};
use crate::config::{Config, ConfigError, TOKEN_ENV_VAR};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::image::ImageResolver;
use crate::notifier::{DiscordClient, NotificationComposer};
use crate::poller::{Announcer, FeedPoller};

/// Wires configuration to the production collaborators.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<HttpFetcher>,
    pub delivery: Arc<DiscordClient>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpFetcher::build_client()?;
        let fetcher = Arc::new(HttpFetcher::new(client.clone()));
        let delivery = Arc::new(DiscordClient::new(client, &config.discord));

        Ok(Self {
            config,
            fetcher,
            delivery,
        })
    }

    pub fn image_resolver(&self) -> Result<ImageResolver> {
        ImageResolver::new(self.fetcher.clone(), self.config.image.clone())
    }

    /// Build the poller. Requires a Discord token.
    pub fn poller(&self) -> Result<FeedPoller> {
        if self.config.discord.token.trim().is_empty() {
            return Err(FeedbellError::Config(ConfigError::Invalid(format!(
                "no Discord token: set discord.token or {}",
                TOKEN_ENV_VAR
            ))));
        }

        let announcer = Announcer::new(
            self.delivery.clone(),
            self.image_resolver()?,
            NotificationComposer::new(self.config.notifier.clone()),
        );

        Ok(FeedPoller::new(
            self.config.feeds.clone(),
            self.fetcher.clone(),
            announcer,
        ))
    }
}
