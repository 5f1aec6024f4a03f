//! Core price feed parser implementation

use std::io::Read;
use tracing::{debug, info};

use crate::Result;
use crate::app::models::PriceRecord;
use crate::app::services::feed_reader::{ParseResult, ParseStats, Row, RowReader, RowShape};
use crate::app::services::field_parsers::{
    parse_bool, parse_communication_datetime, parse_price, parse_station_id,
};
use crate::constants::{PRICE_FIELD_COUNT, price_columns};

const PRICE_ROW: RowShape = RowShape::strict(PRICE_FIELD_COUNT);

/// Parse a complete price snapshot.
///
/// Records are returned in source order. The first malformed row aborts the
/// batch with its line number, and so does any field containing a `"`.
pub fn parse_prices<R: Read>(
    reader: R,
    header_lines: usize,
) -> Result<ParseResult<Vec<PriceRecord>>> {
    let mut rows = RowReader::new(reader, header_lines, PRICE_ROW)?;
    let mut stats = ParseStats::new();
    let mut records = Vec::new();

    while let Some(row) = rows.next_row()? {
        stats.rows_read += 1;
        records.push(parse_price_record(&row)?);
        stats.records_parsed += 1;
    }

    info!("Parsed {} price records", stats.records_parsed);
    debug!("Price feed stats: {:?}", stats);

    Ok(ParseResult { records, stats })
}

/// Convert a five-field row into a [`PriceRecord`]
pub fn parse_price_record(row: &Row) -> Result<PriceRecord> {
    PRICE_ROW.check(row.line, row.fields.len())?;

    let station_id = parse_station_id(row.field(0), row.line, price_columns::STATION_ID)?;
    let fuel_type = row.field(1).to_string();
    let price = parse_price(row.field(2), row.line, price_columns::PRICE)?;
    let self_service = parse_bool(row.field(3), row.line, price_columns::SELF_SERVICE)?;
    let communicated_at =
        parse_communication_datetime(row.field(4), row.line, price_columns::COMMUNICATED_AT)?;

    Ok(PriceRecord {
        station_id,
        fuel_type,
        price,
        self_service,
        communicated_at,
    })
}
