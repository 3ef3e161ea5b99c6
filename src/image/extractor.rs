use scraper::{Html, Selector};

use crate::app::{FeedbellError, Result};
use crate::image::ImageConfig;

/// One step of the fallback chain.
struct Stage {
    source: String,
    selector: Selector,
    attr: &'static str,
}

/// A non-empty attribute value found by one of the stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch {
    /// Zero-based position of the stage in the chain.
    pub stage: usize,
    /// Selector text that produced the match.
    pub selector: String,
    /// Raw attribute value, possibly relative.
    pub value: String,
}

/// Extracts a representative image from article markup using an ordered
/// chain of selectors. The first stage whose first element carries a
/// non-empty attribute wins.
pub struct ImageExtractor {
    stages: Vec<Stage>,
}

impl ImageExtractor {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let img_stages = config.selectors.iter().map(|s| (s, "src"));
        let meta_stages = config.meta_selectors.iter().map(|s| (s, "content"));

        let stages = img_stages
            .chain(meta_stages)
            .map(|(source, attr)| -> Result<Stage> {
                let selector =
                    Selector::parse(source).map_err(|e| FeedbellError::Selector {
                        selector: source.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(Stage {
                    source: source.clone(),
                    selector,
                    attr,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { stages })
    }

    pub fn extract(&self, markup: &str) -> Option<ImageMatch> {
        let document = Html::parse_document(markup);

        self.stages.iter().enumerate().find_map(|(index, stage)| {
            let element = document.select(&stage.selector).next()?;
            let value = element.value().attr(stage.attr)?.trim();
            if value.is_empty() {
                return None;
            }
            Some(ImageMatch {
                stage: index,
                selector: stage.source.clone(),
                value: value.to_string(),
            })
        })
    }
}

/// Turn a matched attribute into an absolute http(s) URL.
///
/// Root-relative paths are joined onto `base_url` with its trailing slash
/// removed. Protocol-relative values take the scheme of `base_url`, or https.
/// Anything that does not end up as http(s) is rejected.
pub fn absolutize(value: &str, base_url: Option<&str>) -> Option<String> {
    let resolved = match base_url {
        Some(base) if value.starts_with("//") => {
            let scheme = base.split_once("://").map(|(s, _)| s).unwrap_or("https");
            format!("{}:{}", scheme, value)
        }
        Some(base) if value.starts_with('/') => {
            format!("{}{}", base.trim_end_matches('/'), value)
        }
        _ => value.to_string(),
    };

    if is_http_url(&resolved) {
        Some(resolved)
    } else {
        None
    }
}

fn is_http_url(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
