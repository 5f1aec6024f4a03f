//! Price feed parser for the MIMIT daily price snapshot
//!
//! The snapshot (`prezzo_alle_8.csv`) lists every price communicated by every
//! active station, one row per station, fuel and service mode:
//!
//! ```text
//! Estrazione del 2024-01-02
//! idImpianto;descCarburante;prezzo;isSelf;dtComu
//! 3464;Benzina;1.859;1;1/1/2024 08:00:00
//! ```
//!
//! Parsing is strict: a row of the wrong width or a field that does not
//! convert fails the whole batch, and no partial result is returned.
//!
//! - [`parser`] - Batch orchestration over a byte stream
//!
//! ## Usage
//!
//! ```rust
//! use carburanti::app::services::price_feed::parse_prices;
//!
//! # fn example() -> carburanti::Result<()> {
//! let csv = "Estrazione del 2024-01-02\nidImpianto;descCarburante;prezzo;isSelf;dtComu\n\
//!            3464;Benzina;1.859;1;1/1/2024 08:00:00\n";
//! let result = parse_prices(csv.as_bytes(), 2)?;
//! assert_eq!(result.records.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{parse_price_record, parse_prices};
