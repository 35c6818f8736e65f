//! Dev.to article and comment extraction

use super::{extract_with_selectors, MessageExtractor};
use crate::models::Message;
use crate::Result;
use scraper::Selector;

/// Extractor for Dev.to article bodies and comments
pub struct DevToExtractor {
    primary: Selector,
    fallback: Selector,
}

impl DevToExtractor {
    pub fn new() -> Self {
        Self {
            primary: Selector::parse("div.body").expect("static selector"),
            fallback: Selector::parse("div.comment__body").expect("static selector"),
        }
    }
}

impl Default for DevToExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageExtractor for DevToExtractor {
    fn extract(&self, html: &str, source_url: &str) -> Result<Vec<Message>> {
        extract_with_selectors(
            html,
            source_url,
            "devto",
            &self.primary,
            &self.fallback,
            "user-profile",
        )
    }
}
