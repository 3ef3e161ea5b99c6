use feed_rs::parser;
use html_escape::decode_html_entities;
use scraper::Html;

use crate::app::FetchError;
use crate::domain::FeedItem;

/// Converts RSS/Atom/JSON Feed documents into [`FeedItem`]s, keeping document order.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<FeedItem>, FetchError> {
        let feed = parser::parse(body).map_err(|e| FetchError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let summary = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .map(|markup| plain_text(&markup))
                    .filter(|text| !text.is_empty());

                FeedItem {
                    title: entry
                        .title
                        .map(|t| decode_html_entities(t.content.trim()).to_string())
                        .unwrap_or_default(),
                    link: entry.links.first().map(|l| l.href.clone()),
                    summary,
                    published_at: entry.published.or(entry.updated),
                }
            })
            .collect();

        Ok(items)
    }
}

/// Strip markup from a summary, leaving whitespace-collapsed text.
pub fn plain_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let text: String = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
