//! Shared test utilities and fixtures for price feed tests

use crate::Error;
use crate::app::models::{PriceRecord, StationId};
use chrono::NaiveDate;
use std::io::{self, Cursor, Read};


/// Two-line preamble as published by MIMIT
pub const PRICE_HEADER: &str =
    "Estrazione del 2024-01-02\nidImpianto;descCarburante;prezzo;isSelf;dtComu\n";

/// Build a complete price feed from data rows
pub fn price_feed(rows: &[&str]) -> String {
    let mut content = PRICE_HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Create an expected price record
pub fn price_record(
    station_id: i64,
    fuel_type: &str,
    price: f64,
    self_service: bool,
    (day, month, year): (u32, u32, i32),
    (hour, minute, second): (u32, u32, u32),
) -> PriceRecord {
    PriceRecord {
        station_id: StationId(station_id),
        fuel_type: fuel_type.to_string(),
        price,
        self_service,
        communicated_at: NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap(),
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
