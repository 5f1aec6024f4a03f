//! Feed retrieval entry points
//!
//! [`CarburantiClient`] ties the configuration, a [`Fetcher`] and an
//! observer together. [`fetch_prices`] and [`fetch_stations`] are one-shot
//! shortcuts over the live MIMIT endpoints.

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::Result;
use crate::app::adapters::http::{Fetcher, HttpFetcher};
use crate::app::models::{PriceRecord, StationMap};
use crate::app::services::events::{FeedObserver, TracingObserver};
use crate::app::services::price_feed::parse_prices;
use crate::app::services::station_registry::parse_stations;
use crate::config::FeedConfig;

/// Client for the price and station feeds
///
/// Every call fetches and parses from scratch; nothing is cached between
/// calls, so a client can be shared freely across threads.
#[derive(Clone)]
pub struct CarburantiClient {
    config: FeedConfig,
    fetcher: Arc<dyn Fetcher>,
    observer: Arc<dyn FeedObserver>,
}

impl CarburantiClient {
    /// Create a client fetching over HTTP with the given configuration
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a client with a custom transport
    pub fn with_fetcher(config: FeedConfig, fetcher: impl Fetcher + 'static) -> Self {
        Self {
            config,
            fetcher: Arc::new(fetcher),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer receiving skipped-row and duplicate-station events
    pub fn with_observer(mut self, observer: Arc<dyn FeedObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch and parse the price snapshot.
    ///
    /// Fails as a whole on the first malformed row.
    pub fn fetch_prices(&self) -> Result<Vec<PriceRecord>> {
        let started = Instant::now();
        let stream = self.fetcher.fetch(&self.config.prices_url)?;
        let result = parse_prices(stream, self.config.header_lines)?;

        info!(
            "Fetched {} price records from {} in {:.2?}",
            result.stats.records_parsed,
            self.config.prices_url,
            started.elapsed()
        );
        Ok(result.records)
    }

    /// Fetch and parse the station registry.
    ///
    /// Rows of the wrong width are skipped and reported to the observer.
    pub fn fetch_stations(&self) -> Result<StationMap> {
        let started = Instant::now();
        let stream = self.fetcher.fetch(&self.config.stations_url)?;
        let result = parse_stations(stream, self.config.header_lines, self.observer.as_ref())?;

        info!(
            "Fetched {} stations from {} in {:.2?} ({} rows skipped, {} duplicates)",
            result.records.len(),
            self.config.stations_url,
            started.elapsed(),
            result.stats.rows_skipped,
            result.stats.duplicates_replaced
        );
        Ok(result.records)
    }
}

impl std::fmt::Debug for CarburantiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarburantiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Fetch the live price snapshot with default settings
pub fn fetch_prices() -> Result<Vec<PriceRecord>> {
    CarburantiClient::new(FeedConfig::default())?.fetch_prices()
}

/// Fetch the live station registry with default settings
pub fn fetch_stations() -> Result<StationMap> {
    CarburantiClient::new(FeedConfig::default())?.fetch_stations()
}
