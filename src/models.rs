//! Data models for scrape outcomes, extracted messages, and summaries
//!
//! Serde field names on [`ScrapeOutcome`] and [`ScrapeSummary`] are part
//! of the export wire contract and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message or conversation entry extracted from a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message content (never empty)
    pub content: String,

    /// Author initials, if an author could be identified
    pub author_initials: Option<String>,

    /// Message date/timestamp, if present in the markup
    pub date: Option<DateTime<Utc>>,

    /// Source platform (reddit, stackoverflow, etc.)
    pub platform: String,

    /// URL where the message was found
    pub url: String,
}

/// Result of one scrape attempt
///
/// Immutable once created: use [`ScrapeOutcome::ok`] or
/// [`ScrapeOutcome::failed`], which enforce that a failed outcome carries
/// an error and a zero message count, and a successful one carries neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    /// Whether scraping was successful
    pub success: bool,

    /// URL that was scraped
    pub url: String,

    /// Number of messages extracted
    pub messages_count: usize,

    /// Error message if scraping failed
    pub error: Option<String>,

    /// When the scrape occurred
    pub timestamp: DateTime<Utc>,
}

impl ScrapeOutcome {
    /// Creates a successful outcome with the given message count
    pub fn ok(url: impl Into<String>, messages_count: usize) -> Self {
        Self {
            success: true,
            url: url.into(),
            messages_count,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a failed outcome with the given error description
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: url.into(),
            messages_count: 0,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Summary statistics over a set of scrape outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeSummary {
    /// Total number of URLs attempted
    pub total_urls: usize,

    /// Number of successful scrapes
    pub successful: usize,

    /// Number of failed scrapes
    pub failed: usize,

    /// Total messages extracted across successful scrapes
    pub total_messages: usize,

    /// Percentage of successful scrapes (0 when nothing was attempted)
    pub success_rate: f64,
}

impl ScrapeSummary {
    /// Computes a summary from a slice of outcomes
    pub fn from_outcomes(outcomes: &[ScrapeOutcome]) -> Self {
        let total = outcomes.len();
        let successful = outcomes.iter().filter(|o| o.success).count();
        let failed = total - successful;
        let total_messages = outcomes
            .iter()
            .filter(|o| o.success)
            .map(|o| o.messages_count)
            .sum();
        let success_rate = if total > 0 {
            successful as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_urls: total,
            successful,
            failed,
            total_messages,
            success_rate,
        }
    }
}

/// The persisted export format: all outcomes plus their summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub results: Vec<ScrapeOutcome>,
    pub summary: ScrapeSummary,
}
