//! Scraper registry and factory
//!
//! Maps normalized platform identifiers to scraper constructors. Platform
//! ids are trimmed and lowercased for every keyed operation, registration
//! silently overwrites an existing entry (last writer wins), and the
//! backing map is a `BTreeMap` so platform iteration is always in
//! lexicographic order — the orchestrator's routing tie-break depends on
//! that.

use crate::config::ScraperConfig;
use crate::scrape::{PlatformScraper, Scraper};
use crate::{Result, ScrapeError};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Constructor for a scraper instance
///
/// Factories are stored instead of instances so every scrape call gets a
/// fresh scraper. The `Scraper` trait bound is what the registry requires
/// of a constructor; anything else is a compile error.
pub type ScraperFactory = Box<dyn Fn() -> Result<Box<dyn Scraper>> + Send + Sync>;

/// Registry of platform scrapers
#[derive(Default)]
pub struct ScraperRegistry {
    scrapers: BTreeMap<String, ScraperFactory>,
}

impl ScraperRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the four built-in platforms registered
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration each constructed scraper's fetcher will use
    pub fn with_default_platforms(config: &ScraperConfig) -> Result<Self> {
        let mut registry = Self::new();

        let cfg = config.clone();
        registry.register("reddit", move || {
            Ok(Box::new(PlatformScraper::reddit(&cfg)?) as Box<dyn Scraper>)
        })?;

        let cfg = config.clone();
        registry.register("stackoverflow", move || {
            Ok(Box::new(PlatformScraper::stackoverflow(&cfg)?) as Box<dyn Scraper>)
        })?;

        let cfg = config.clone();
        registry.register("medium", move || {
            Ok(Box::new(PlatformScraper::medium(&cfg)?) as Box<dyn Scraper>)
        })?;

        let cfg = config.clone();
        registry.register("devto", move || {
            Ok(Box::new(PlatformScraper::devto(&cfg)?) as Box<dyn Scraper>)
        })?;

        Ok(registry)
    }

    /// Registers a scraper constructor for a platform
    ///
    /// Overwrites any existing registration under the same normalized key.
    ///
    /// # Arguments
    ///
    /// * `platform` - Platform name (normalized: trimmed, lowercased)
    /// * `factory` - Constructor returning a boxed scraper
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Registered
    /// * `Err(ScrapeError::InvalidInput)` - Empty or blank platform name
    pub fn register<F>(&mut self, platform: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Result<Box<dyn Scraper>> + Send + Sync + 'static,
    {
        let key = normalize_platform(platform)?;
        self.scrapers.insert(key.clone(), Box::new(factory));

        info!("Scraper registered for platform: {}", key);
        Ok(())
    }

    /// Removes a platform's registration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Unregistered
    /// * `Err(ScrapeError::UnknownPlatform)` - Platform was not registered
    pub fn unregister(&mut self, platform: &str) -> Result<()> {
        let key = normalize_platform(platform)?;

        if self.scrapers.remove(&key).is_none() {
            return Err(ScrapeError::UnknownPlatform {
                platform: platform.to_string(),
                supported: self.supported_platforms(),
            });
        }

        info!("Scraper unregistered for platform: {}", key);
        Ok(())
    }

    /// Creates a scraper instance for the given platform
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn Scraper>)` - Freshly constructed scraper
    /// * `Err(ScrapeError::UnknownPlatform)` - No registration for the key
    ///   (carries the list of currently supported platforms)
    /// * `Err(ScrapeError::ConstructionFailure)` - The constructor faulted
    pub fn create(&self, platform: &str) -> Result<Box<dyn Scraper>> {
        let key = normalize_platform(platform)?;

        let factory = self
            .scrapers
            .get(&key)
            .ok_or_else(|| ScrapeError::UnknownPlatform {
                platform: platform.to_string(),
                supported: self.supported_platforms(),
            })?;

        match factory() {
            Ok(scraper) => {
                debug!("Scraper created for platform: {}", key);
                Ok(scraper)
            }
            Err(e) => Err(ScrapeError::ConstructionFailure {
                platform: key,
                message: e.to_string(),
            }),
        }
    }

    /// Returns true if the platform has a registration
    ///
    /// Blank input yields `false`, never an error.
    pub fn is_supported(&self, platform: &str) -> bool {
        match normalize_platform(platform) {
            Ok(key) => self.scrapers.contains_key(&key),
            Err(_) => false,
        }
    }

    /// Returns all registered platform ids in lexicographic order
    pub fn supported_platforms(&self) -> Vec<String> {
        self.scrapers.keys().cloned().collect()
    }
}

/// Normalizes a platform id: trims, lowercases, rejects blank input
fn normalize_platform(platform: &str) -> Result<String> {
    let normalized = platform.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(ScrapeError::InvalidInput(
            "Platform must be a non-empty string".to_string(),
        ));
    }

    Ok(normalized)
}
