//! Carburanti Library
//!
//! A Rust library for retrieving the Italian Ministry of Enterprises (MIMIT)
//! open-data fuel feeds and parsing them into typed collections.
//!
//! This library provides tools for:
//! - Fetching the daily price snapshot and the active station registry over HTTP
//! - Skipping the non-standard two-line header both feeds carry
//! - Parsing `;`-delimited rows into [`PriceRecord`] and [`Station`] values
//! - Strict batch parsing for prices, lenient row skipping for stations
//! - Reporting skipped rows and duplicate stations through an injectable observer
//!
//! ```no_run
//! # fn example() -> carburanti::Result<()> {
//! let prices = carburanti::fetch_prices()?;
//! let stations = carburanti::fetch_stations()?;
//!
//! for record in prices.iter().take(3) {
//!     let name = stations
//!         .get(&record.station_id)
//!         .map(|s| s.name.as_str())
//!         .unwrap_or("unknown");
//!     println!("{} {} {:.3}", name, record.fuel_type, record.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod events;
        pub mod feed_reader;
        pub mod field_parsers;
        pub mod price_feed;
        pub mod station_registry;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod http;
    }
}

// Re-export commonly used types
pub use app::adapters::filesystem::FileFetcher;
pub use app::adapters::http::{Fetcher, HttpFetcher};
pub use app::models::{PriceRecord, Station, StationId, StationMap, StationType};
pub use app::services::events::{FeedEvent, FeedObserver, TracingObserver};
pub use app::services::feed_reader::{ParseResult, ParseStats};
pub use app::services::price_feed::parse_prices;
pub use app::services::station_registry::parse_stations;
pub use client::{CarburantiClient, fetch_prices, fetch_stations};
pub use config::FeedConfig;

/// Result type alias for carburanti operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed retrieval and parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The remote resource could not be reached or answered with a failure status
    #[error("Transport error fetching '{url}': {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reading the header lines or the underlying byte stream failed
    #[error("Stream error: {message}")]
    Stream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A column could not be converted to its typed value
    #[error("Malformed field '{field}' on line {line}: '{value}' ({reason})")]
    MalformedField {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A row had the wrong number of columns
    #[error("Unexpected row shape on line {line}: expected {expected} fields, found {found}")]
    UnexpectedShape {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a transport error with the underlying cause
    pub fn transport(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a stream error with the underlying cause
    pub fn stream(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Stream {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed field error
    pub fn malformed_field(
        line: u64,
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedField {
            line,
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unexpected shape error
    pub fn unexpected_shape(line: u64, expected: usize, found: usize) -> Self {
        Self::UnexpectedShape {
            line,
            expected,
            found,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error came from the network layer rather than the data
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

