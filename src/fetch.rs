//! HTTP fetch client
//!
//! This module handles all HTTP requests for the scrapers, including:
//! - Building a reqwest client with the configured user agent
//! - GET requests to fetch page content
//! - HEAD requests to check URL availability
//! - Retry logic with exponential backoff for transient failures
//! - Per-instance rate limiting between requests
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 429, 500, 502, 503, 504 | Retry up to `max-retries` times |
//! | Timeout | Retry up to `max-retries` times |
//! | Connection refused | Retry up to `max-retries` times |
//! | Other non-2xx status | Immediate failure |
//!
//! The delay between attempts doubles each time, starting from
//! `retry-delay`. Only GET and HEAD are issued here, so every retried
//! request is idempotent.

use crate::config::ScraperConfig;
use crate::{Result, ScrapeError};
use reqwest::{Client, Method, Response};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP status codes that are considered transient and retried
const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// HTTP client with retry logic and rate limiting
///
/// The rate limiter is per-instance: two fetchers do not share a
/// last-request timestamp.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    config: ScraperConfig,
    last_request: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    /// Creates a new fetcher from the given configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Scraper configuration (timeout, retries, delays, user agent)
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Successfully built fetcher
    /// * `Err(ScrapeError)` - Failed to build the underlying HTTP client
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout_duration())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    /// Creates a fetcher with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ScraperConfig::default())
    }

    /// Performs a GET request with rate limiting and retry logic
    ///
    /// # Arguments
    ///
    /// * `url` - URL to request
    /// * `timeout` - Per-call timeout override (uses the configured default if `None`)
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Response body
    /// * `Err(ScrapeError)` - `InvalidInput` for malformed URLs (checked
    ///   before any network activity), `Timeout`/`ConnectionFailure` on
    ///   retry exhaustion, `HttpError` for non-2xx responses
    pub async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<String> {
        validate_url(url)?;

        let response = self.execute(Method::GET, url, timeout).await?;
        let status = response.status();
        let body = response.text().await?;

        info!("Successfully retrieved: {} (status: {})", url, status);
        Ok(body)
    }

    /// Performs a HEAD request to check URL availability
    ///
    /// # Arguments
    ///
    /// * `url` - URL to check
    /// * `timeout` - Per-call timeout override (uses the configured default if `None`)
    ///
    /// # Returns
    ///
    /// * `Ok(HashMap)` - Response headers (non-UTF-8 header values are skipped)
    /// * `Err(ScrapeError)` - Same failure modes as [`HttpFetcher::get`]
    pub async fn head(&self, url: &str, timeout: Option<Duration>) -> Result<HashMap<String, String>> {
        validate_url(url)?;

        let response = self.execute(Method::HEAD, url, timeout).await?;
        let status = response.status();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        info!("HEAD request successful for {} (status: {})", url, status);
        Ok(headers)
    }

    /// Sends a request, retrying transient failures with exponential backoff
    async fn execute(&self, method: Method, url: &str, timeout: Option<Duration>) -> Result<Response> {
        let timeout = timeout.unwrap_or_else(|| self.config.timeout_duration());
        let mut attempt: u32 = 0;

        loop {
            self.apply_rate_limit().await;

            debug!("{} request to: {} (attempt {})", method, url, attempt + 1);
            let result = self
                .client
                .request(method.clone(), url)
                .timeout(timeout)
                .send()
                .await;

            let failure = match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = ScrapeError::HttpError {
                        url: url.to_string(),
                        status: status.as_u16(),
                    };

                    if !RETRY_STATUSES.contains(&status.as_u16()) {
                        return Err(error);
                    }
                    error
                }
                Err(e) if e.is_timeout() => ScrapeError::Timeout {
                    url: url.to_string(),
                    seconds: timeout.as_secs(),
                },
                Err(e) if e.is_connect() => ScrapeError::ConnectionFailure {
                    url: url.to_string(),
                },
                Err(e) => return Err(ScrapeError::Reqwest(e)),
            };

            if attempt >= self.config.max_retries {
                warn!("Retries exhausted for {}: {}", url, failure);
                return Err(failure);
            }

            // Doubling is capped so large max-retries values cannot
            // overflow the exponent.
            let backoff = Duration::from_secs_f64(
                self.config.retry_delay * 2f64.powi(attempt.min(31) as i32),
            );
            debug!(
                "Transient failure for {} ({}), retrying in {:.1}s",
                url,
                failure,
                backoff.as_secs_f64()
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }

    /// Applies rate limiting between requests
    ///
    /// Sleeps for the remainder of `request-delay` if the previous request
    /// from this instance was issued more recently than that. The lock is
    /// released before sleeping; requests on one fetcher are sequential, so
    /// the update after the sleep cannot race.
    async fn apply_rate_limit(&self) {
        let wait = {
            let last = self.last_request.lock().unwrap();
            last.and_then(|instant| {
                self.config
                    .request_delay_duration()
                    .checked_sub(instant.elapsed())
            })
        };

        if let Some(wait) = wait {
            if !wait.is_zero() {
                debug!("Rate limiting: sleeping for {:.2}s", wait.as_secs_f64());
                tokio::time::sleep(wait).await;
            }
        }

        *self.last_request.lock().unwrap() = Some(Instant::now());
    }
}

/// Validates that a URL is non-empty and uses an accepted scheme
///
/// This runs before any network activity; a violating URL fails with
/// `InvalidInput`.
fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ScrapeError::InvalidInput("URL cannot be empty".to_string()));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ScrapeError::InvalidInput(format!("Invalid URL: {}", url)));
    }

    Ok(())
}
