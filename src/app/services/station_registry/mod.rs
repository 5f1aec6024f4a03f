//! Station registry parser for the MIMIT active station list
//!
//! The registry (`anagrafica_impianti_attivi.csv`) has one row per station:
//!
//! ```text
//! Estrazione del 2024-01-02
//! idImpianto;Gestore;Bandiera;Tipo Impianto;Nome Impianto;Indirizzo;Comune;Provincia;Latitudine;Longitudine
//! 100;ROSSI SRL;Agip Eni;Stradale;ROSSI;VIA ROMA 1;ROMA;RM;41.9028;12.4964
//! ```
//!
//! Unlike the price feed, parsing is lenient about row width: rows that do
//! not have ten fields are reported through the [`FeedObserver`] and skipped.
//! An identifier that is not an integer still fails the whole registry.
//! Stations are keyed by identifier and a later row replaces an earlier one.
//!
//! [`FeedObserver`]: crate::app::services::events::FeedObserver

pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{parse_station_record, parse_stations};
