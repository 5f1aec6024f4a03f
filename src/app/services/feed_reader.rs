//! Shared row scanning for the MIMIT CSV feeds
//!
//! Both feeds are `;`-delimited, carry a two-line preamble that is not a
//! proper CSV header (an extraction date line followed by the column names),
//! and are read in a single pass. This module handles the preamble, the
//! tokenizing, and the row-shape policy; the feed modules only convert fields.

use crate::constants::FIELD_DELIMITER;
use crate::{Error, Result};
use csv::{ByteRecord, ReaderBuilder};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    /// Successfully parsed records
    pub records: T,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Data rows encountered after the header
    pub rows_read: usize,

    /// Rows converted into records
    pub records_parsed: usize,

    /// Rows skipped because of a wrong field count
    pub rows_skipped: usize,

    /// Records that replaced an earlier record with the same key
    pub duplicates_replaced: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of data rows that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.rows_read as f64) * 100.0
        }
    }
}

/// How `"` characters in a field are treated
///
/// Quotes never delimit fields in either feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePolicy {
    /// Quotes are ordinary characters and are kept as they appear
    Verbatim,

    /// Any quote fails the read with a stream error
    Reject,
}

/// Expected row width and what to do when a row does not match it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    pub expected_fields: usize,
    pub lenient: bool,
    pub quotes: QuotePolicy,
}

impl RowShape {
    /// Rows of the wrong width or containing quotes fail the whole read
    pub const fn strict(expected_fields: usize) -> Self {
        Self {
            expected_fields,
            lenient: false,
            quotes: QuotePolicy::Reject,
        }
    }

    /// Rows of the wrong width are reported and skipped; quotes are kept
    pub const fn lenient(expected_fields: usize) -> Self {
        Self {
            expected_fields,
            lenient: true,
            quotes: QuotePolicy::Verbatim,
        }
    }

    /// Check a row's width.
    ///
    /// Returns `Ok(true)` when the row should be parsed, `Ok(false)` when a
    /// lenient shape wants it skipped, and an error for a strict mismatch.
    pub fn check(&self, line: u64, found: usize) -> Result<bool> {
        if found == self.expected_fields {
            Ok(true)
        } else if self.lenient {
            Ok(false)
        } else {
            Err(Error::unexpected_shape(line, self.expected_fields, found))
        }
    }
}

/// Consume exactly `count` lines from the start of the stream.
///
/// Lines are read as raw bytes so a non-UTF-8 preamble is not an error. A
/// stream that ends before `count` lines have been read is.
pub fn skip_header_lines<R: Read>(reader: R, count: usize) -> Result<BufReader<R>> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    for skipped in 0..count {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::stream("Failed to read header line", Some(Box::new(e))))?;

        if read == 0 {
            return Err(Error::stream(
                format!("Stream ended after {} of {} header lines", skipped, count),
                None,
            ));
        }
    }

    debug!("Skipped {} header lines", count);
    Ok(reader)
}

/// Decode a raw field, replacing invalid UTF-8 sequences
pub fn decode_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A tokenized data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the original document, header included
    pub line: u64,

    /// Decoded field values
    pub fields: Vec<String>,
}

impl Row {
    /// Field at `index`, or an empty string when absent
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Single-pass `;`-delimited row reader positioned after the header
pub struct RowReader<R: Read> {
    inner: csv::Reader<BufReader<R>>,
    record: ByteRecord,
    line_offset: u64,
    quotes: QuotePolicy,
}

impl<R: Read> RowReader<R> {
    /// Skip `header_lines` lines of `reader` and prepare to read data rows
    /// following `shape`'s quote policy
    pub fn new(reader: R, header_lines: usize, shape: RowShape) -> Result<Self> {
        let body = skip_header_lines(reader, header_lines)?;

        // Row width is enforced by RowShape so both policies share a reader.
        let inner = ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(body);

        Ok(Self {
            inner,
            record: ByteRecord::new(),
            line_offset: header_lines as u64,
            quotes: shape.quotes,
        })
    }

    /// Read the next row, or `None` at end of stream
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let more = self
            .inner
            .read_byte_record(&mut self.record)
            .map_err(record_error)?;

        if !more {
            return Ok(None);
        }

        let line = self.line_offset
            + self
                .record
                .position()
                .map(|position| position.line())
                .unwrap_or(0);

        if self.quotes == QuotePolicy::Reject {
            if let Some(index) = self.record.iter().position(|field| field.contains(&b'"')) {
                return Err(Error::stream(
                    format!("Unexpected quote in field {} on line {}", index + 1, line),
                    None,
                ));
            }
        }

        Ok(Some(Row {
            line,
            fields: self.record.iter().map(decode_field).collect(),
        }))
    }
}

/// Unwrap I/O failures so the caller sees the `io::Error` as the source
fn record_error(error: csv::Error) -> Error {
    match error.into_kind() {
        csv::ErrorKind::Io(e) => Error::stream("Failed to read feed body", Some(Box::new(e))),
        kind => Error::stream(format!("Failed to read CSV record: {:?}", kind), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Yields `content` and then fails with `ConnectionReset`
    struct BrokenStream {
        content: Cursor<Vec<u8>>,
    }

    impl Read for BrokenStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.content.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
                n => Ok(n),
            }
        }
    }

    fn read_with(content: &str, header_lines: usize, shape: RowShape) -> Result<Vec<Row>> {
        let reader = Cursor::new(content.as_bytes().to_vec());
        let mut reader = RowReader::new(reader, header_lines, shape)?;
        let mut rows = Vec::new();
        while let Some(row) = reader.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }

    fn read_all(content: &str, header_lines: usize) -> Result<Vec<Row>> {
        read_with(content, header_lines, RowShape::lenient(0))
    }

    #[test]
    fn test_skip_header_lines() {
        let mut reader = skip_header_lines(Cursor::new("one\ntwo\nthree\n"), 2).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "three\n");
    }

    #[test]
    fn test_skip_header_lines_tolerates_invalid_utf8() {
        let content = b"Estrazione del 2024-01-01 \xe8\nidImpianto;x\n1;2\n".to_vec();
        let mut reader = skip_header_lines(Cursor::new(content), 2).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "1;2\n");
    }

    #[test]
    fn test_skip_header_lines_short_stream() {
        let err = skip_header_lines(Cursor::new("only one line\n"), 2).err().unwrap();
        assert!(matches!(err, Error::Stream { .. }));
        assert!(err.to_string().contains("1 of 2"));

        let err = skip_header_lines(Cursor::new(""), 2).err().unwrap();
        assert!(matches!(err, Error::Stream { .. }));
    }

    #[test]
    fn test_header_without_trailing_newline_then_eof() {
        // The second header line counts even without a terminator; no data follows.
        let rows = read_all("Estrazione\nheader", 2).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_zero_header_lines() {
        let rows = read_all("1;a\n2;b\n", 0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].fields, vec!["2", "b"]);
    }

    #[test]
    fn test_rows_are_split_on_semicolons() {
        let rows = read_all("date\ncols\n1;Benzina;1.739\n2;Gasolio;1.650\n", 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["1", "Benzina", "1.739"]);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[1].line, 4);
    }

    #[test]
    fn test_commas_are_not_delimiters() {
        let rows = read_all("d\nc\n1;VIA ROMA, 5;x\n", 2).unwrap();
        assert_eq!(rows[0].fields, vec!["1", "VIA ROMA, 5", "x"]);
    }

    #[test]
    fn test_rows_of_varying_width_are_returned() {
        let rows = read_all("d\nc\n1;2;3\n1;2\n1;2;3;4\n", 2).unwrap();
        let widths: Vec<usize> = rows.iter().map(|r| r.fields.len()).collect();
        assert_eq!(widths, vec![3, 2, 4]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = read_all("d\nc\n1;2\n\n3;4\n", 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["3", "4"]);
    }

    #[test]
    fn test_quotes_inside_fields_are_kept() {
        let rows = read_all("d\nc\n1;BAR \"DA MARIO\";x\n", 2).unwrap();
        assert_eq!(rows[0].fields[1], "BAR \"DA MARIO\"");
    }

    #[test]
    fn test_leading_quote_is_kept_verbatim() {
        let rows = read_all("d\nc\n1;\"ABC\" DEF;x\n", 2).unwrap();
        assert_eq!(rows[0].fields, vec!["1", "\"ABC\" DEF", "x"]);
    }

    #[test]
    fn test_quotes_do_not_protect_delimiters() {
        let rows = read_all("d\nc\n1;\"A;B\";x\n", 2).unwrap();
        assert_eq!(rows[0].fields, vec!["1", "\"A", "B\"", "x"]);
    }

    #[test]
    fn test_reject_policy_fails_on_quote() {
        let shape = RowShape::strict(3);
        let err = read_with("d\nc\n1;ok;x\n2;AB\"C;x\n", 2, shape).unwrap_err();
        assert!(matches!(err, Error::Stream { .. }));
        assert!(err.to_string().contains("field 2 on line 4"), "{}", err);

        let rows = read_with("d\nc\n1;ok;x\n", 2, shape).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_body_read_failure_keeps_io_source() {
        let stream = BrokenStream {
            content: Cursor::new(b"d\nc\n1;2\n".to_vec()),
        };
        let mut reader = RowReader::new(stream, 2, RowShape::lenient(2)).unwrap();
        assert_eq!(reader.next_row().unwrap().unwrap().fields, vec!["1", "2"]);

        let err = reader.next_row().unwrap_err();
        assert!(matches!(err, Error::Stream { .. }));
        let source = std::error::Error::source(&err).unwrap();
        let io_err = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let content = b"d\nc\n1;CAFF\xc8\n".to_vec();
        let mut reader = RowReader::new(Cursor::new(content), 2, RowShape::lenient(2)).unwrap();
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.fields[1], "CAFF\u{FFFD}");
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = read_all("d\r\nc\r\n1;2\r\n3;4\r\n", 2).unwrap();
        assert_eq!(rows[0].fields, vec!["1", "2"]);
        assert_eq!(rows[1].fields, vec!["3", "4"]);
    }

    #[test]
    fn test_row_shape_check() {
        let strict = RowShape::strict(5);
        assert!(strict.check(3, 5).unwrap());
        let err = strict.check(7, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedShape {
                line: 7,
                expected: 5,
                found: 4
            }
        ));

        let lenient = RowShape::lenient(10);
        assert!(lenient.check(3, 10).unwrap());
        assert!(!lenient.check(4, 9).unwrap());
    }

    #[test]
    fn test_row_field_accessor() {
        let row = Row {
            line: 3,
            fields: vec!["a".to_string()],
        };
        assert_eq!(row.field(0), "a");
        assert_eq!(row.field(5), "");
    }

    #[test]
    fn test_success_rate() {
        let mut stats = ParseStats::new();
        assert_eq!(stats.success_rate(), 0.0);
        stats.rows_read = 4;
        stats.records_parsed = 3;
        assert_eq!(stats.success_rate(), 75.0);
    }
}
