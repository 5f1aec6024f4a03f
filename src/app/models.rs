//! Data models for the carburanti feeds
//!
//! This module contains the typed representations of the two MIMIT feeds:
//! price communications ([`PriceRecord`]) and the registry of fuel stations
//! ([`Station`]).

use crate::constants::station_types;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Station Identifier
// =============================================================================

/// Station identifier (`idImpianto`), the primary key of the station registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub i64);

impl StationId {
    /// Raw numeric value
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for StationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Station registry keyed by identifier
pub type StationMap = HashMap<StationId, Station>;

// =============================================================================
// Price Record
// =============================================================================

/// A single price communication for one fuel at one station
///
/// Many records share a station identifier: the feed lists every fuel, and
/// both self and served prices, for each station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Station the price was communicated for (not checked against the registry)
    pub station_id: StationId,

    /// Fuel label as published, e.g. "Benzina", "Gasolio"
    pub fuel_type: String,

    /// Price per unit, currency implicit (EUR)
    pub price: f64,

    /// Whether the price applies to self-service dispensing
    pub self_service: bool,

    /// When the operator communicated the price, in Italian local time
    pub communicated_at: NaiveDateTime,
}

// =============================================================================
// Station
// =============================================================================

/// Station category as published in the `Tipo Impianto` column
///
/// The feed is not validated against the known labels; anything else is kept
/// verbatim in [`StationType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StationType {
    /// Roadside station ("Stradale")
    Roadside,
    /// Motorway station ("Autostradale")
    Motorway,
    /// Any other label, including the empty string
    Other(String),
}

impl StationType {
    /// Source text of the station type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Roadside => station_types::ROADSIDE,
            Self::Motorway => station_types::MOTORWAY,
            Self::Other(label) => label,
        }
    }

    /// Whether this is an `Autostradale` station
    pub fn is_motorway(&self) -> bool {
        matches!(self, Self::Motorway)
    }
}

impl From<&str> for StationType {
    fn from(label: &str) -> Self {
        match label {
            station_types::ROADSIDE => Self::Roadside,
            station_types::MOTORWAY => Self::Motorway,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StationType {
    fn from(label: String) -> Self {
        match label.as_str() {
            station_types::ROADSIDE => Self::Roadside,
            station_types::MOTORWAY => Self::Motorway,
            _ => Self::Other(label),
        }
    }
}

impl From<StationType> for String {
    fn from(station_type: StationType) -> Self {
        match station_type {
            StationType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fuel station metadata from the active station registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier
    pub id: StationId,

    /// Operator running the station (Gestore)
    pub operator: String,

    /// Brand the station trades under (Bandiera)
    pub brand: String,

    /// Roadside or motorway
    pub station_type: StationType,

    /// Display name (Nome Impianto)
    pub name: String,

    /// Street address
    pub address: String,

    /// Municipality (Comune)
    pub municipality: String,

    /// Province code, e.g. "RM"
    pub province: String,

    /// Latitude as published; not guaranteed to be numeric
    pub latitude: String,

    /// Longitude as published; not guaranteed to be numeric
    pub longitude: String,
}

impl Station {
    /// Latitude and longitude as numbers, when both parse
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lon = self.longitude.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}
