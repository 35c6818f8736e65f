//! Stack Overflow post extraction

use super::{extract_with_selectors, MessageExtractor};
use crate::models::Message;
use crate::Result;
use scraper::Selector;

/// Extractor for Stack Overflow question and answer bodies
pub struct StackOverflowExtractor {
    primary: Selector,
    fallback: Selector,
}

impl StackOverflowExtractor {
    pub fn new() -> Self {
        Self {
            // s-prose is the current class; post-text covers older pages
            primary: Selector::parse("div.s-prose").expect("static selector"),
            fallback: Selector::parse("div.post-text").expect("static selector"),
        }
    }
}

impl Default for StackOverflowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageExtractor for StackOverflowExtractor {
    fn extract(&self, html: &str, source_url: &str) -> Result<Vec<Message>> {
        extract_with_selectors(
            html,
            source_url,
            "stackoverflow",
            &self.primary,
            &self.fallback,
            "user-details",
        )
    }
}
