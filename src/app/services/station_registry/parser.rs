//! Station record parsing from the registry CSV

use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

use crate::Result;
use crate::app::models::{Station, StationMap, StationType};
use crate::app::services::events::{FeedEvent, FeedObserver};
use crate::app::services::feed_reader::{ParseResult, ParseStats, Row, RowReader, RowShape};
use crate::app::services::field_parsers::parse_station_id;
use crate::constants::{STATION_FIELD_COUNT, station_columns};

const STATION_ROW: RowShape = RowShape::lenient(STATION_FIELD_COUNT);

/// Parse the complete station registry into a map keyed by station ID.
///
/// Rows of the wrong width are skipped with a [`FeedEvent::MalformedRow`].
/// Duplicate identifiers keep the last row and emit
/// [`FeedEvent::DuplicateStation`].
pub fn parse_stations<R: Read>(
    reader: R,
    header_lines: usize,
    observer: &dyn FeedObserver,
) -> Result<ParseResult<StationMap>> {
    let mut rows = RowReader::new(reader, header_lines, STATION_ROW)?;
    let mut stats = ParseStats::new();
    let mut stations: StationMap = HashMap::new();

    while let Some(row) = rows.next_row()? {
        stats.rows_read += 1;

        if !STATION_ROW.check(row.line, row.fields.len())? {
            stats.rows_skipped += 1;
            observer.on_event(&FeedEvent::MalformedRow {
                line: row.line,
                expected: STATION_ROW.expected_fields,
                found: row.fields.len(),
            });
            continue;
        }

        let station = parse_station_record(&row)?;
        stats.records_parsed += 1;

        let replacement_type = station.station_type.clone();
        if let Some(previous) = stations.insert(station.id, station) {
            stats.duplicates_replaced += 1;
            observer.on_event(&FeedEvent::DuplicateStation {
                id: previous.id,
                line: row.line,
                previous_type: previous.station_type,
                replacement_type,
            });
        }
    }

    info!(
        "Parsed {} stations ({} rows skipped, {} duplicates replaced)",
        stations.len(),
        stats.rows_skipped,
        stats.duplicates_replaced
    );
    debug!("Station feed stats: {:?}", stats);

    Ok(ParseResult {
        records: stations,
        stats,
    })
}

/// Convert a ten-field row into a [`Station`].
///
/// Only the identifier is validated; every other column is kept verbatim.
pub fn parse_station_record(row: &Row) -> Result<Station> {
    let id = parse_station_id(row.field(0), row.line, station_columns::STATION_ID)?;

    Ok(Station {
        id,
        operator: row.field(1).to_string(),
        brand: row.field(2).to_string(),
        station_type: StationType::from(row.field(3)),
        name: row.field(4).to_string(),
        address: row.field(5).to_string(),
        municipality: row.field(6).to_string(),
        province: row.field(7).to_string(),
        latitude: row.field(8).to_string(),
        longitude: row.field(9).to_string(),
    })
}
