//! HTML extractors for the supported platforms
//!
//! Each platform has its own selector set, but the extraction shape is the
//! same everywhere: parse the document, walk the content elements, clean
//! the text, and attach author initials when an author element precedes
//! the content. The core only ever counts the returned messages; the
//! extractors are where platform knowledge lives.

mod devto;
mod medium;
mod reddit;
mod stackoverflow;
mod text;

pub use devto::DevToExtractor;
pub use medium::MediumExtractor;
pub use reddit::RedditExtractor;
pub use stackoverflow::StackOverflowExtractor;

use crate::models::Message;
use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// At most this many messages are extracted from a single document
const MAX_MESSAGES: usize = 100;

/// Capability for turning raw HTML into extracted messages
///
/// Implementations fail with `ParseFailure` on structurally invalid input
/// (empty content or markup without a `<body>`); an empty message list is
/// not an error.
pub trait MessageExtractor: Send + Sync {
    /// Extracts messages from raw HTML
    ///
    /// # Arguments
    ///
    /// * `html` - Raw HTML content
    /// * `source_url` - URL the content was fetched from, recorded on each message
    fn extract(&self, html: &str, source_url: &str) -> Result<Vec<Message>>;
}

/// Shared extraction walk used by all platform extractors
///
/// Selects `primary` elements, falling back to `fallback` when the primary
/// selector matches nothing, and builds one [`Message`] per non-empty
/// content element, up to [`MAX_MESSAGES`].
fn extract_with_selectors(
    html: &str,
    source_url: &str,
    platform: &str,
    primary: &Selector,
    fallback: &Selector,
    author_class: &str,
) -> Result<Vec<Message>> {
    let document = parse_document(html)?;

    let elements: Vec<ElementRef> = {
        let matched: Vec<ElementRef> = document.select(primary).collect();
        if matched.is_empty() {
            document.select(fallback).collect()
        } else {
            matched
        }
    };

    let mut messages = Vec::new();

    for element in elements.into_iter().take(MAX_MESSAGES) {
        let content = text::clean_text(&element.text().collect::<String>());
        if content.is_empty() {
            continue;
        }

        let author_initials = text::preceding_class_text(element, author_class)
            .and_then(|author| text::author_initials(&author));

        messages.push(Message {
            content,
            author_initials,
            date: None,
            platform: platform.to_string(),
            url: source_url.to_string(),
        });
    }

    if messages.is_empty() {
        warn!("No messages extracted from {} content", platform);
    } else {
        debug!("Extracted {} messages from {} content", messages.len(), platform);
    }

    Ok(messages)
}

/// Parses HTML and rejects structurally invalid input
fn parse_document(html: &str) -> Result<Html> {
    if html.trim().is_empty() {
        return Err(ScrapeError::ParseFailure(
            "HTML content must be a non-empty string".to_string(),
        ));
    }

    let document = Html::parse_document(html);

    // html5ever synthesizes a <body> for most inputs; its absence means
    // the markup was beyond repair.
    let body = Selector::parse("body").expect("static selector");
    if document.select(&body).next().is_none() {
        return Err(ScrapeError::ParseFailure(
            "empty or invalid structure".to_string(),
        ));
    }

    Ok(document)
}
