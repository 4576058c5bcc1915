//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - one pretty-printed JSON document - requires `json-output` feature
//! - [`write_csv_tables`] - one semicolon-delimited file per table - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{write_csv_tables, write_json};
//! use chatlens::core::{Analyzer, FilterCriteria};
//! use chatlens::parser::{Parser, WhatsAppParser};
//! use chatlens::report::Report;
//!
//! let corpus = WhatsAppParser::new().parse_file("chat.txt")?;
//! let report = Report::build(&Analyzer::new(), &corpus, &FilterCriteria::overall(), &[])?;
//!
//! write_json(&report, "report.json")?;
//! write_csv_tables(&report, "report_tables")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::write_csv_tables;
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
