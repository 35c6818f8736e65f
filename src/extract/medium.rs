//! Medium article extraction

use super::{extract_with_selectors, MessageExtractor};
use crate::models::Message;
use crate::Result;
use scraper::Selector;

/// Extractor for Medium story content
pub struct MediumExtractor {
    primary: Selector,
    fallback: Selector,
}

impl MediumExtractor {
    pub fn new() -> Self {
        Self {
            primary: Selector::parse("article").expect("static selector"),
            fallback: Selector::parse("div.article-content").expect("static selector"),
        }
    }
}

impl Default for MediumExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageExtractor for MediumExtractor {
    fn extract(&self, html: &str, source_url: &str) -> Result<Vec<Message>> {
        extract_with_selectors(
            html,
            source_url,
            "medium",
            &self.primary,
            &self.fallback,
            "author-name",
        )
    }
}
