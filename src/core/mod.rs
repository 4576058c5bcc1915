//! Core processing logic for chatlens.
//!
//! This module contains:
//! - [`builder`] - Pairs timestamps with message bodies into a [`Corpus`]
//! - [`corpus`] - The immutable record collection and borrowed views
//! - [`filter`] - User and date-range filtering
//! - [`analysis`] - Summary tables over a filtered view
//! - [`output`] - JSON and CSV report writers
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{Analyzer, FilterCriteria, UserSelection};
//! use chatlens::parser::{Parser, WhatsAppParser};
//!
//! # fn main() -> chatlens::Result<()> {
//! let corpus = WhatsAppParser::new().parse_str("1/1/23, 10:00 PM - Alice: Hi")?;
//! let criteria = FilterCriteria::new(UserSelection::from_name("Alice"));
//! let view = criteria.apply(&corpus);
//!
//! let stats = Analyzer::new().fetch_stats(criteria.user(), &view);
//! assert_eq!(stats.messages, 1);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod builder;
pub mod corpus;
pub mod filter;
mod frequency;
pub mod output;

// Re-export main types for convenience
pub use analysis::{Analyzer, BasicStats, BusyUsers, Heatmap, Insights};
pub use builder::build_corpus;
pub use corpus::{Corpus, CorpusView, OVERALL};
pub use filter::{DateRange, FilterCriteria, UserSelection, parse_date};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::write_csv_tables;
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
