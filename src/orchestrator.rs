//! Scrape orchestration
//!
//! The orchestrator coordinates scraping across URLs and platforms:
//! route each URL to the first matching scraper (platforms tried in
//! lexicographic order — a deliberate, deterministic tie-break when
//! several domain sets could match), accumulate every outcome, and
//! produce summaries and exports over the accumulated state.
//!
//! Batch operations never abort early on a single URL's failure; only
//! structurally invalid calls (empty batch, blank platform name) fail
//! before any work begins.

use crate::models::{ExportRecord, ScrapeOutcome, ScrapeSummary};
use crate::registry::ScraperRegistry;
use crate::storage::ResultStore;
use crate::{Result, ScrapeError};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Coordinates scraping operations across multiple URLs and platforms
pub struct Orchestrator {
    registry: ScraperRegistry,
    store: Box<dyn ResultStore>,
    outcomes: Vec<ScrapeOutcome>,
}

impl Orchestrator {
    /// Creates an orchestrator from a registry and a result store
    pub fn new(registry: ScraperRegistry, store: Box<dyn ResultStore>) -> Self {
        info!(
            "Orchestrator initialized with {} platforms",
            registry.supported_platforms().len()
        );
        Self {
            registry,
            store,
            outcomes: Vec::new(),
        }
    }

    /// Scrapes a single URL with the first scraper that can handle it
    ///
    /// The resulting outcome — success or failure — is appended to the
    /// accumulated state. Once a scraper has matched this never fails,
    /// even when the scrape itself did.
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeOutcome)` - The outcome of the scrape attempt
    /// * `Err(ScrapeError::InvalidInput)` - Empty URL (nothing is appended)
    /// * `Err(ScrapeError::NoScraperFound)` - No registered scraper matches;
    ///   a failed outcome has been appended
    pub async fn scrape_one(&mut self, url: &str) -> Result<ScrapeOutcome> {
        if url.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "URL must be a non-empty string".to_string(),
            ));
        }

        info!("Starting scrape for single URL: {}", url);

        // First match in sorted platform order wins; constructors that
        // fault are skipped rather than aborting the lookup.
        let mut selected = None;
        for platform in self.registry.supported_platforms() {
            match self.registry.create(&platform) {
                Ok(scraper) => {
                    if scraper.can_handle(url) {
                        debug!("Found scraper for {}: {}", url, scraper.platform_id());
                        selected = Some(scraper);
                        break;
                    }
                }
                Err(e) => {
                    debug!("Scraper {} error: {}", platform, e);
                    continue;
                }
            }
        }

        let scraper = match selected {
            Some(scraper) => scraper,
            None => {
                let err = ScrapeError::NoScraperFound(url.to_string());
                error!("{}", err);
                self.outcomes.push(ScrapeOutcome::failed(url, err.to_string()));
                return Err(err);
            }
        };

        let outcome = scraper.scrape(url).await;
        self.outcomes.push(outcome.clone());

        if outcome.success {
            info!(
                "Successfully scraped {} messages from {}",
                outcome.messages_count, url
            );
        } else {
            warn!(
                "Scraping failed for {}: {}",
                url,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }

        Ok(outcome)
    }

    /// Scrapes multiple URLs sequentially, in input order
    ///
    /// Per-URL failures (including `NoScraperFound`) are converted into
    /// failed outcomes, so the returned vector always has one entry per
    /// input URL, in input order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ScrapeOutcome>)` - One outcome per URL
    /// * `Err(ScrapeError::InvalidInput)` - Empty URL list (no work was done)
    pub async fn scrape_many(&mut self, urls: &[String]) -> Result<Vec<ScrapeOutcome>> {
        if urls.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "URLs list cannot be empty".to_string(),
            ));
        }

        info!("Starting scrape for {} URLs", urls.len());

        let mut results = Vec::with_capacity(urls.len());

        for (idx, url) in urls.iter().enumerate() {
            debug!("Scraping URL {}/{}: {}", idx + 1, urls.len(), url);

            match self.scrape_one(url).await {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    warn!("Failed to scrape {}: {}", url, e);
                    results.push(ScrapeOutcome::failed(url, e.to_string()));
                }
            }
        }

        info!(
            "Completed scraping {} URLs. Successful: {}, Failed: {}",
            urls.len(),
            results.iter().filter(|r| r.success).count(),
            results.iter().filter(|r| !r.success).count()
        );

        Ok(results)
    }

    /// Scrapes a batch of URLs expected to belong to one platform
    ///
    /// The platform name is validated against the registry, but each URL
    /// still routes through the generic first-match dispatch: a URL whose
    /// domain belongs to a different registered platform is scraped by
    /// that platform's scraper, not forced to the named one.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ScrapeOutcome>)` - One outcome per URL, in input order
    /// * `Err(ScrapeError::InvalidInput)` - Blank platform or empty URL list
    /// * `Err(ScrapeError::UnknownPlatform)` - Platform is not registered
    pub async fn scrape_platform(
        &mut self,
        platform: &str,
        urls: &[String],
    ) -> Result<Vec<ScrapeOutcome>> {
        if platform.trim().is_empty() {
            return Err(ScrapeError::InvalidInput(
                "Platform must be a non-empty string".to_string(),
            ));
        }

        if urls.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "URLs list cannot be empty".to_string(),
            ));
        }

        if !self.registry.is_supported(platform) {
            return Err(ScrapeError::UnknownPlatform {
                platform: platform.to_string(),
                supported: self.registry.supported_platforms(),
            });
        }

        info!(
            "Starting scrape for platform '{}' with {} URLs",
            platform,
            urls.len()
        );

        let mut results = Vec::with_capacity(urls.len());

        for (idx, url) in urls.iter().enumerate() {
            debug!(
                "Scraping {} URL {}/{}: {}",
                platform,
                idx + 1,
                urls.len(),
                url
            );

            match self.scrape_one(url).await {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    error!("Error scraping {}: {}", url, e);
                    results.push(ScrapeOutcome::failed(url, e.to_string()));
                }
            }
        }

        info!(
            "Completed scraping {}: {} URLs processed",
            platform,
            results.len()
        );

        Ok(results)
    }

    /// Returns summary statistics over all accumulated outcomes
    ///
    /// Pure read-side aggregation; calling this never changes state.
    pub fn summary(&self) -> ScrapeSummary {
        ScrapeSummary::from_outcomes(&self.outcomes)
    }

    /// Returns the accumulated outcomes in arrival order
    pub fn outcomes(&self) -> &[ScrapeOutcome] {
        &self.outcomes
    }

    /// Exports all accumulated outcomes plus their summary
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the record was written
    /// * `Err(ScrapeError::EmptyState)` - Nothing has been accumulated
    /// * `Err(ScrapeError::Io)` - The store failed to write
    pub fn export(&self, name: &str) -> Result<PathBuf> {
        if self.outcomes.is_empty() {
            return Err(ScrapeError::EmptyState);
        }

        info!("Exporting {} results to {}", self.outcomes.len(), name);

        let record = ExportRecord {
            results: self.outcomes.clone(),
            summary: self.summary(),
        };

        self.store.save(&record, name)
    }

    /// Clears all accumulated outcomes
    pub fn reset(&mut self) {
        self.outcomes.clear();
        info!("Orchestrator reset");
    }

    /// Access to the underlying registry
    pub fn registry(&self) -> &ScraperRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::{extract_domain, Scraper};
    use crate::storage::JsonStorage;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Scraper bound to one domain that succeeds with a fixed count
    struct DomainStub {
        id: &'static str,
        domain: &'static str,
        messages: usize,
    }

    #[async_trait]
    impl Scraper for DomainStub {
        fn can_handle(&self, url: &str) -> bool {
            extract_domain(url) == self.domain
        }

        async fn scrape(&self, url: &str) -> ScrapeOutcome {
            ScrapeOutcome::ok(url, self.messages)
        }

        fn platform_id(&self) -> &str {
            self.id
        }
    }

    fn orchestrator_with(stubs: Vec<(&'static str, &'static str, usize)>) -> (Orchestrator, TempDir) {
        let mut registry = ScraperRegistry::new();
        for (id, domain, messages) in stubs {
            registry
                .register(id, move || {
                    Ok(Box::new(DomainStub {
                        id,
                        domain,
                        messages,
                    }) as Box<dyn Scraper>)
                })
                .unwrap();
        }

        let dir = TempDir::new().unwrap();
        let store = Box::new(JsonStorage::new(dir.path()).unwrap());
        (Orchestrator::new(registry, store), dir)
    }

    #[tokio::test]
    async fn test_scrape_one_empty_url() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);

        let result = orch.scrape_one("").await;
        assert!(matches!(result, Err(ScrapeError::InvalidInput(_))));
        // Nothing accumulated for structurally invalid input
        assert!(orch.outcomes().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_one_no_scraper_found_appends_failed_outcome() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);

        let result = orch.scrape_one("https://unknown.example/page").await;
        assert!(matches!(result, Err(ScrapeError::NoScraperFound(_))));

        assert_eq!(orch.outcomes().len(), 1);
        let outcome = &orch.outcomes()[0];
        assert!(!outcome.success);
        assert_eq!(outcome.messages_count, 0);
    }

    #[tokio::test]
    async fn test_scrape_one_routes_first_match_in_sorted_order() {
        // Both stubs claim the same domain; "alpha" sorts before "beta"
        let (mut orch, _dir) =
            orchestrator_with(vec![("beta", "shared.com", 9), ("alpha", "shared.com", 1)]);

        let outcome = orch.scrape_one("https://shared.com/page").await.unwrap();
        assert_eq!(outcome.messages_count, 1);
    }

    #[tokio::test]
    async fn test_scrape_many_preserves_order_and_length() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);

        let urls = vec![
            "https://mock.com/a".to_string(),
            "https://nomatch.example/b".to_string(),
            "https://mock.com/c".to_string(),
        ];

        let results = orch.scrape_many(&urls).await.unwrap();
        assert_eq!(results.len(), urls.len());
        assert_eq!(results[0].url, "https://mock.com/a");
        assert_eq!(results[1].url, "https://nomatch.example/b");
        assert_eq!(results[2].url, "https://mock.com/c");
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(results[2].success);
    }

    #[tokio::test]
    async fn test_scrape_many_empty_list() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);
        let result = orch.scrape_many(&[]).await;
        assert!(matches!(result, Err(ScrapeError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_scrape_platform_validates_support() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);

        let urls = vec!["https://mock.com/a".to_string()];

        let err = orch.scrape_platform("unknown", &urls).await.unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownPlatform { .. }));

        let err = orch.scrape_platform("  ", &urls).await.unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidInput(_)));

        let err = orch.scrape_platform("mock", &[]).await.unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_summary_and_reset() {
        let (mut orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 2)]);

        let urls = vec![
            "https://mock.com/a".to_string(),
            "https://mock.com/b".to_string(),
            "https://elsewhere.example/c".to_string(),
        ];
        orch.scrape_many(&urls).await.unwrap();

        let summary = orch.summary();
        assert_eq!(summary.total_urls, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_messages, 4);
        assert_eq!(summary.successful + summary.failed, summary.total_urls);

        orch.reset();
        let summary = orch.summary();
        assert_eq!(summary.total_urls, 0);
        assert_eq!(summary.successful, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total_messages, 0);
        assert_eq!(summary.success_rate, 0.0);
    }

    #[tokio::test]
    async fn test_export_empty_state() {
        let (orch, _dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);
        let result = orch.export("results");
        assert!(matches!(result, Err(ScrapeError::EmptyState)));
    }

    #[tokio::test]
    async fn test_export_after_scrape() {
        let (mut orch, dir) = orchestrator_with(vec![("mock", "mock.com", 1)]);

        orch.scrape_one("https://mock.com/a").await.unwrap();
        let path = orch.export("results").unwrap();
        assert!(path.exists());

        let storage = JsonStorage::new(dir.path()).unwrap();
        let record = storage.load("results").unwrap();
        assert_eq!(record.summary.total_urls, 1);
        assert_eq!(record.results.len(), 1);
    }
}
