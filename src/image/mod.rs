//! Cover image resolution for announced items.
//!
//! ```text
//! Item link → MarkupFetcher → ImageExtractor → absolutize → image URL
//! ```
//!
//! Resolution is best-effort: every failure degrades to "no image" so the
//! announcement still goes out without a picture.

mod config;
mod extractor;

pub use config::ImageConfig;
pub use extractor::{absolutize, ImageExtractor, ImageMatch};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::Result;
use crate::fetcher::MarkupFetcher;

pub struct ImageResolver {
    fetcher: Arc<dyn MarkupFetcher + Send + Sync>,
    extractor: ImageExtractor,
    config: ImageConfig,
}

impl ImageResolver {
    pub fn new(fetcher: Arc<dyn MarkupFetcher + Send + Sync>, config: ImageConfig) -> Result<Self> {
        let extractor = ImageExtractor::new(&config)?;
        Ok(Self {
            fetcher,
            extractor,
            config,
        })
    }

    /// Find an absolute image URL for the article at `article_link`.
    pub async fn resolve(&self, article_link: Option<&str>, base_url: Option<&str>) -> Option<String> {
        let link = article_link.filter(|l| !l.trim().is_empty())?;

        if !self.config.enabled {
            return None;
        }

        let markup = match self
            .fetcher
            .fetch_markup(link, &self.config.user_agent, self.config.timeout())
            .await
        {
            Ok(markup) => markup,
            Err(e) if e.is_timeout() => {
                warn!("Timed out fetching article {} for image: {}", link, e);
                return None;
            }
            Err(e) => {
                warn!("Error fetching article {} for image: {}", link, e);
                return None;
            }
        };

        let Some(found) = self.extractor.extract(&markup) else {
            info!("No suitable image found on the page: {}", link);
            return None;
        };
        debug!(
            "Found image candidate {} with selector {:?} (stage {})",
            found.value, found.selector, found.stage
        );

        let resolved = absolutize(&found.value, base_url);
        match &resolved {
            Some(url) if *url != found.value => debug!("Resolved relative image URL to {}", url),
            Some(_) => {}
            None => debug!("Discarding non-http image URL {:?} from {}", found.value, link),
        }
        resolved
    }
}
