//! Configuration for feed retrieval.
//!
//! Provides the feed locations, the header layout and the HTTP client
//! settings. Defaults point at the live MIMIT endpoints; tests and callers
//! with mirrored snapshots substitute their own URLs.

use crate::constants::{
    DEFAULT_HEADER_LINES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, PRICES_CSV_URL,
    STATIONS_CSV_URL,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Feed retrieval configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Location of the price snapshot
    pub prices_url: String,

    /// Location of the station registry
    pub stations_url: String,

    /// Number of leading lines to discard before the first data row
    pub header_lines: usize,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            prices_url: PRICES_CSV_URL.to_string(),
            stations_url: STATIONS_CSV_URL.to_string(),
            header_lines: DEFAULT_HEADER_LINES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FeedConfig {
    /// Set the price feed location
    pub fn with_prices_url(mut self, url: impl Into<String>) -> Self {
        self.prices_url = url.into();
        self
    }

    /// Set the station feed location
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set the number of header lines to skip
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Set the HTTP timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.prices_url.trim().is_empty() {
            return Err(Error::configuration("prices_url must not be empty"));
        }

        if self.stations_url.trim().is_empty() {
            return Err(Error::configuration("stations_url must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration("timeout_secs must be greater than 0"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::configuration("user_agent must not be empty"));
        }

        debug!(
            "Validated feed config: prices={}, stations={}, header_lines={}",
            self.prices_url, self.stations_url, self.header_lines
        );
        Ok(())
    }
}
