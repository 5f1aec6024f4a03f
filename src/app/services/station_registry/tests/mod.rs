//! Shared test utilities and fixtures for station registry tests

use crate::Error;
use crate::app::models::{Station, StationId, StationType};
use crate::app::services::events::{FeedEvent, FeedObserver};
use std::io::{self, Cursor, Read};
use std::sync::Mutex;


/// Two-line preamble as published by MIMIT
pub const STATION_HEADER: &str = "Estrazione del 2024-01-02\n\
idImpianto;Gestore;Bandiera;Tipo Impianto;Nome Impianto;Indirizzo;Comune;Provincia;Latitudine;Longitudine\n";

/// Build a complete station feed from data rows
pub fn station_feed(rows: &[&str]) -> String {
    let mut content = STATION_HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Build a well-formed station row
pub fn station_row(id: &str, station_type: &str, name: &str) -> String {
    format!(
        "{};ROSSI SRL;Agip Eni;{};{};VIA ROMA 1;ROMA;RM;41.9028;12.4964",
        id, station_type, name
    )
}

/// Create the station [`station_row`] describes
pub fn create_test_station(id: i64, station_type: &str, name: &str) -> Station {
    Station {
        id: StationId(id),
        operator: "ROSSI SRL".to_string(),
        brand: "Agip Eni".to_string(),
        station_type: StationType::from(station_type),
        name: name.to_string(),
        address: "VIA ROMA 1".to_string(),
        municipality: "ROMA".to_string(),
        province: "RM".to_string(),
        latitude: "41.9028".to_string(),
        longitude: "12.4964".to_string(),
    }
}

/// Observer that keeps every event it receives
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<FeedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl FeedObserver for RecordingObserver {
    fn on_event(&self, event: &FeedEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Reader that yields `content` and then fails with `ConnectionReset`
pub struct BrokenStream {
    content: Cursor<Vec<u8>>,
}

impl BrokenStream {
    pub fn new(content: String) -> Self {
        Self {
            content: Cursor::new(content.into_bytes()),
        }
    }
}

impl Read for BrokenStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.content.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
            n => Ok(n),
        }
    }
}

/// Assert `err` is a stream error caused by a connection reset
pub fn assert_connection_reset(err: &Error) {
    assert!(matches!(err, Error::Stream { .. }), "{:?}", err);
    let source = std::error::Error::source(err).expect("stream error without source");
    let io_err = source.downcast_ref::<io::Error>().expect("source is not an io::Error");
    assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
}
