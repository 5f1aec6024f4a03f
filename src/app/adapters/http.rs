//! HTTP transport for the feeds
//!
//! The parsers only need "a byte stream for this URL"; [`Fetcher`] is that
//! seam, and [`HttpFetcher`] is the blocking reqwest implementation used by
//! default.

use crate::config::FeedConfig;
use crate::{Error, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

/// Byte stream returned by a [`Fetcher`]
pub type FeedStream = Box<dyn Read + Send>;

/// Source of raw feed bytes
pub trait Fetcher: Send + Sync {
    /// Open the resource at `url` for reading
    fn fetch(&self, url: &str) -> Result<FeedStream>;
}

impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    fn fetch(&self, url: &str) -> Result<FeedStream> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the timeout and user agent from `config`
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                Error::transport("<client>", "Failed to create HTTP client", Some(Box::new(e)))
            })?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FeedStream> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::transport(url, "Request failed", Some(Box::new(e))))?;

        let status = response.status();
        debug!(
            "Response from {}: status={}, content_length={:?}",
            url,
            status,
            response.content_length()
        );

        let response = response.error_for_status().map_err(|e| {
            Error::transport(url, format!("Server returned {}", status), Some(Box::new(e)))
        })?;

        Ok(Box::new(response))
    }
}
