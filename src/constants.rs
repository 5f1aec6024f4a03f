//! Application constants for the carburanti feeds
//!
//! This module contains the feed locations, format parameters and default
//! values used throughout the library.

// =============================================================================
// Feed Locations
// =============================================================================

/// Daily price snapshot published by MIMIT (prices valid at 08:00)
pub const PRICES_CSV_URL: &str = "https://www.mimit.gov.it/images/exportCSV/prezzo_alle_8.csv";

/// Registry of active fuel stations published by MIMIT
pub const STATIONS_CSV_URL: &str =
    "https://www.mimit.gov.it/images/exportCSV/anagrafica_impianti_attivi.csv";

// =============================================================================
// Feed Format
// =============================================================================

/// Both feeds start with an extraction date line followed by the column names
pub const DEFAULT_HEADER_LINES: usize = 2;

/// Field delimiter used by both feeds
pub const FIELD_DELIMITER: u8 = b';';

/// Number of columns in a price row
pub const PRICE_FIELD_COUNT: usize = 5;

/// Number of columns in a station row
pub const STATION_FIELD_COUNT: usize = 10;

/// Communication timestamp format, e.g. `1/1/2024 08:00:00`
///
/// chrono is lenient about digit counts and padding when parsing, so the
/// layout is checked against the width tables below first.
pub const COMMUNICATION_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Allowed digit counts for day, month and year
pub const COMMUNICATION_DATE_WIDTHS: [(usize, usize); 3] = [(1, 2), (1, 2), (4, 4)];

/// Allowed digit counts for hour, minute and second
pub const COMMUNICATION_TIME_WIDTHS: [(usize, usize); 3] = [(1, 2), (2, 2), (2, 2)];

/// Column names of the price feed, in source order
pub mod price_columns {
    pub const STATION_ID: &str = "idImpianto";
    pub const FUEL_TYPE: &str = "descCarburante";
    pub const PRICE: &str = "prezzo";
    pub const SELF_SERVICE: &str = "isSelf";
    pub const COMMUNICATED_AT: &str = "dtComu";
}

/// Column names of the station feed, in source order
pub mod station_columns {
    pub const STATION_ID: &str = "idImpianto";
    pub const OPERATOR: &str = "Gestore";
    pub const BRAND: &str = "Bandiera";
    pub const STATION_TYPE: &str = "Tipo Impianto";
    pub const NAME: &str = "Nome Impianto";
    pub const ADDRESS: &str = "Indirizzo";
    pub const MUNICIPALITY: &str = "Comune";
    pub const PROVINCE: &str = "Provincia";
    pub const LATITUDE: &str = "Latitudine";
    pub const LONGITUDE: &str = "Longitudine";
}

// =============================================================================
// Value Lexicons
// =============================================================================

/// Textual forms accepted as `true`
pub const BOOL_TRUE_VALUES: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];

/// Textual forms accepted as `false`
pub const BOOL_FALSE_VALUES: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

/// Station type labels
pub mod station_types {
    /// Roadside station
    pub const ROADSIDE: &str = "Stradale";

    /// Motorway station
    pub const MOTORWAY: &str = "Autostradale";
}

// =============================================================================
// HTTP Defaults
// =============================================================================

/// Default request timeout in seconds; the station registry is several MB
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("carburanti/", env!("CARGO_PKG_VERSION"));
