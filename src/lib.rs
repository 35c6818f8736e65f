//! Threadscrape: a scraper for conversational web content
//!
//! This crate fetches discussion pages from a fixed set of known platforms
//! (Reddit, Stack Overflow, Medium, Dev.to), extracts the messages they
//! contain, and aggregates per-URL outcomes into a summarized, exportable
//! report.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod registry;
pub mod scrape;
pub mod storage;

use thiserror::Error;

/// Main error type for threadscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported platform: '{platform}'. Supported platforms: {}", supported.join(", "))]
    UnknownPlatform {
        platform: String,
        supported: Vec<String>,
    },

    #[error("No scraper supports URL: {0}")]
    NoScraperFound(String),

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Failed to connect to {url}")]
    ConnectionFailure { url: String },

    #[error("HTTP {status} error for {url}")]
    HttpError { url: String, status: u16 },

    #[error("Failed to parse HTML: {0}")]
    ParseFailure(String),

    #[error("Failed to create scraper for {platform}: {message}")]
    ConstructionFailure { platform: String, message: String },

    #[error("No results to export")]
    EmptyState,

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for threadscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use fetch::HttpFetcher;
pub use models::{ExportRecord, Message, ScrapeOutcome, ScrapeSummary};
pub use orchestrator::Orchestrator;
pub use registry::ScraperRegistry;
pub use scrape::{extract_domain, PlatformScraper, Scraper};
pub use storage::{JsonStorage, ResultStore};
