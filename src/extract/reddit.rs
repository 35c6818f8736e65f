//! Reddit comment extraction

use super::{extract_with_selectors, MessageExtractor};
use crate::models::Message;
use crate::Result;
use scraper::Selector;

/// Extractor for Reddit comment markup
///
/// Old-reddit comment bodies carry the `md` class; the newer markup tags
/// comment containers with `data-type="comment"`.
pub struct RedditExtractor {
    primary: Selector,
    fallback: Selector,
}

impl RedditExtractor {
    pub fn new() -> Self {
        Self {
            primary: Selector::parse("div.md").expect("static selector"),
            fallback: Selector::parse(r#"div[data-type="comment"]"#).expect("static selector"),
        }
    }
}

impl Default for RedditExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageExtractor for RedditExtractor {
    fn extract(&self, html: &str, source_url: &str) -> Result<Vec<Message>> {
        extract_with_selectors(
            html,
            source_url,
            "reddit",
            &self.primary,
            &self.fallback,
            "author",
        )
    }
}
