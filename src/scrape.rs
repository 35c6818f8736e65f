//! Platform scrapers
//!
//! A scraper binds three things: a domain predicate, a platform identity,
//! and an extraction capability. [`PlatformScraper::scrape`] runs the
//! fetch + extract pipeline and always returns a [`ScrapeOutcome`] — it
//! never propagates an error, whatever the input or the network does.

use crate::config::ScraperConfig;
use crate::extract::{
    DevToExtractor, MediumExtractor, MessageExtractor, RedditExtractor, StackOverflowExtractor,
};
use crate::fetch::HttpFetcher;
use crate::models::ScrapeOutcome;
use crate::{Result, ScrapeError};
use async_trait::async_trait;
use tracing::{error, info};

/// Capability contract for a platform scraper
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns true if this scraper's domain set covers the URL
    ///
    /// Malformed input yields `false`, never an error.
    fn can_handle(&self, url: &str) -> bool;

    /// Scrapes the URL, converting every failure into a failed outcome
    async fn scrape(&self, url: &str) -> ScrapeOutcome;

    /// Stable platform identifier (e.g. "reddit")
    fn platform_id(&self) -> &str;
}

impl std::fmt::Debug for dyn Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper")
            .field("platform_id", &self.platform_id())
            .finish()
    }
}

/// Extracts the domain portion of a URL for matching
///
/// Strips the scheme prefix, cuts at the first `/`, removes a leading
/// `www.` label, and lowercases. This is deliberately a string operation:
/// inputs here may be arbitrary text, and the predicate must never fail.
pub fn extract_domain(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let host = without_scheme.split('/').next().unwrap_or("");
    let host = host.strip_prefix("www.").unwrap_or(host);

    host.to_lowercase()
}

/// A scraper for one platform: domain set + fetcher + extractor
pub struct PlatformScraper {
    platform_id: String,
    domains: Vec<String>,
    fetcher: HttpFetcher,
    extractor: Box<dyn MessageExtractor>,
}

impl PlatformScraper {
    /// Creates a scraper from its parts
    ///
    /// # Arguments
    ///
    /// * `platform_id` - Stable platform identifier
    /// * `domains` - Domains this scraper handles (matched after normalization)
    /// * `fetcher` - HTTP client used for page retrieval
    /// * `extractor` - Platform-specific HTML extraction capability
    pub fn new(
        platform_id: impl Into<String>,
        domains: Vec<String>,
        fetcher: HttpFetcher,
        extractor: Box<dyn MessageExtractor>,
    ) -> Self {
        Self {
            platform_id: platform_id.into(),
            domains,
            fetcher,
            extractor,
        }
    }

    /// Creates the Reddit scraper
    pub fn reddit(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(
            "reddit",
            vec!["reddit.com".to_string(), "old.reddit.com".to_string()],
            HttpFetcher::new(config.clone())?,
            Box::new(RedditExtractor::new()),
        ))
    }

    /// Creates the Stack Overflow scraper
    pub fn stackoverflow(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(
            "stackoverflow",
            vec!["stackoverflow.com".to_string()],
            HttpFetcher::new(config.clone())?,
            Box::new(StackOverflowExtractor::new()),
        ))
    }

    /// Creates the Medium scraper
    pub fn medium(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(
            "medium",
            vec!["medium.com".to_string()],
            HttpFetcher::new(config.clone())?,
            Box::new(MediumExtractor::new()),
        ))
    }

    /// Creates the Dev.to scraper
    pub fn devto(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(
            "devto",
            vec!["dev.to".to_string()],
            HttpFetcher::new(config.clone())?,
            Box::new(DevToExtractor::new()),
        ))
    }
}

#[async_trait]
impl Scraper for PlatformScraper {
    fn can_handle(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        let domain = extract_domain(url);
        self.domains.iter().any(|d| d == &domain)
    }

    async fn scrape(&self, url: &str) -> ScrapeOutcome {
        if url.is_empty() {
            return ScrapeOutcome::failed("unknown", "URL must be a non-empty string");
        }

        if !self.can_handle(url) {
            return ScrapeOutcome::failed(
                url,
                format!("This scraper does not support URL: {}", url),
            );
        }

        info!("Starting scrape for URL: {}", url);

        let html = match self.fetcher.get(url, None).await {
            Ok(body) => body,
            Err(e @ ScrapeError::Timeout { .. }) => {
                error!("Timeout while scraping {}: {}", url, e);
                return ScrapeOutcome::failed(url, format!("Request timeout: {}", e));
            }
            Err(e @ ScrapeError::ConnectionFailure { .. })
            | Err(e @ ScrapeError::HttpError { .. }) => {
                error!("Connection error while scraping {}: {}", url, e);
                return ScrapeOutcome::failed(url, format!("Connection failed: {}", e));
            }
            Err(e) => {
                error!("Unexpected error scraping {}: {}", url, e);
                return ScrapeOutcome::failed(url, format!("Unexpected error: {}", e));
            }
        };

        if html.is_empty() {
            return ScrapeOutcome::failed(url, "No content retrieved from URL");
        }

        match self.extractor.extract(&html, url) {
            Ok(messages) => {
                info!("Successfully scraped {} messages from {}", messages.len(), url);
                ScrapeOutcome::ok(url, messages.len())
            }
            Err(e @ ScrapeError::ParseFailure(_)) => {
                error!("Parsing error for {}: {}", url, e);
                ScrapeOutcome::failed(url, format!("Parsing failed: {}", e))
            }
            Err(e) => {
                error!("Unexpected error scraping {}: {}", url, e);
                ScrapeOutcome::failed(url, format!("Unexpected error: {}", e))
            }
        }
    }

    fn platform_id(&self) -> &str {
        &self.platform_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reddit_scraper() -> PlatformScraper {
        PlatformScraper::reddit(&ScraperConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_domain_strips_scheme_and_path() {
        assert_eq!(extract_domain("https://reddit.com/r/rust"), "reddit.com");
        assert_eq!(extract_domain("http://reddit.com/r/rust"), "reddit.com");
    }

    #[test]
    fn test_extract_domain_strips_leading_www() {
        assert_eq!(extract_domain("https://www.reddit.com/r/rust"), "reddit.com");
    }

    #[test]
    fn test_extract_domain_lowercases() {
        assert_eq!(extract_domain("https://Reddit.COM/r/rust"), "reddit.com");
    }

    #[test]
    fn test_extract_domain_keeps_subdomains_and_ports() {
        assert_eq!(
            extract_domain("https://old.reddit.com/r/rust"),
            "old.reddit.com"
        );
        assert_eq!(extract_domain("http://127.0.0.1:8080/page"), "127.0.0.1:8080");
    }

    #[test]
    fn test_extract_domain_without_scheme() {
        assert_eq!(extract_domain("reddit.com/r/rust"), "reddit.com");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn test_can_handle_reddit_variants() {
        let scraper = reddit_scraper();
        assert!(scraper.can_handle("https://www.reddit.com/r/x"));
        assert!(scraper.can_handle("https://old.reddit.com/r/x"));
        assert!(scraper.can_handle("https://reddit.com/r/x"));
    }

    #[test]
    fn test_can_handle_rejects_other_domains() {
        let scraper = reddit_scraper();
        assert!(!scraper.can_handle("https://medium.com/x"));
        assert!(!scraper.can_handle(""));
        assert!(!scraper.can_handle("not a url at all"));
    }

    #[test]
    fn test_platform_id() {
        assert_eq!(reddit_scraper().platform_id(), "reddit");
        assert_eq!(
            PlatformScraper::devto(&ScraperConfig::default())
                .unwrap()
                .platform_id(),
            "devto"
        );
    }

    #[tokio::test]
    async fn test_scrape_empty_url_returns_failed_outcome() {
        let scraper = reddit_scraper();
        let outcome = scraper.scrape("").await;

        assert!(!outcome.success);
        assert_eq!(outcome.messages_count, 0);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_scrape_unsupported_url_returns_failed_outcome() {
        let scraper = reddit_scraper();
        let outcome = scraper.scrape("https://medium.com/some-story").await;

        assert!(!outcome.success);
        assert!(outcome
            .error
            .as_deref()
            .unwrap()
            .contains("does not support"));
    }
}
