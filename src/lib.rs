//! # Chatlens
//!
//! A Rust library for analyzing WhatsApp chat exports.
//!
//! ## Overview
//!
//! Chatlens reads the plain-text transcript WhatsApp produces when you export
//! a chat, turns it into structured records and computes the usual summary
//! tables: message/word/media/link counts, busiest users, monthly and daily
//! timelines, weekday and month activity, a day-by-hour heatmap, common
//! words, emoji usage and a few conversation insights.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let corpus = WhatsAppParser::new().parse_str(
//!         "1/1/23, 10:00 PM - Alice: Hello there\n\
//!          1/1/23, 10:05 PM - Bob: <Media omitted>\n\
//!          1/1/23, 10:06 PM - Group created",
//!     )?;
//!
//!     let analyzer = Analyzer::new();
//!     let report = Report::build(&analyzer, &corpus, &FilterCriteria::overall(), &[])?;
//!
//!     assert_eq!(report.stats.messages, 3);
//!     assert_eq!(report.stats.media, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Filtering
//!
//! Every aggregation runs on a [`CorpusView`](core::CorpusView) produced by
//! [`FilterCriteria::apply`](core::FilterCriteria::apply):
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let corpus = WhatsAppParser::new().parse_str(
//!     "1/1/23, 10:00 PM - Alice: Hello\n5/1/23, 9:00 AM - Alice: Again\n",
//! )?;
//!
//! let criteria = FilterCriteria::new(UserSelection::from_name("Alice"))
//!     .with_dates(DateRange::parse("2023-01-02", "2023-01-31")?);
//! let view = criteria.apply(&corpus);
//!
//! let daily = Analyzer::new().daily_timeline(criteria.user(), &view);
//! assert_eq!(daily.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait and [`WhatsAppParser`](parser::WhatsAppParser)
//! - [`parsing`] - timestamp recognition and message segmentation
//! - [`record`] - [`Record`](record::Record), [`Body`](record::Body), [`TimeFields`](record::TimeFields)
//! - [`core`] - corpus, filters and the aggregation engine
//!   - [`core::filter`] - [`FilterCriteria`](core::FilterCriteria), [`DateRange`](core::DateRange)
//!   - [`core::analysis`] - [`Analyzer`](core::Analyzer) and its result tables
//!   - [`core::output`] - JSON and CSV writers
//! - [`report`] - [`Report`](report::Report), every table in one value
//! - [`stopwords`] - [`StopWords`](stopwords::StopWords) store
//! - [`collaborators`] - URL and emoji lookups used by the analyzer
//! - [`config`] - parser and analysis settings
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - Unified error types ([`ChatlensError`], [`Result`])
//! - [`prelude`] - Convenient re-exports
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber.
//! The `chatlens` binary logs to stderr, filtered by `RUST_LOG`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod collaborators;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod record;
pub mod report;
pub mod stopwords;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::{Parser, WhatsAppParser};
    pub use crate::record::{Body, Record, TimeFields};

    // Corpus and filtering
    pub use crate::core::{Corpus, CorpusView, DateRange, FilterCriteria, UserSelection};

    // Analysis
    pub use crate::config::{AnalysisConfig, ParserConfig};
    pub use crate::core::Analyzer;
    pub use crate::report::Report;
    pub use crate::stopwords::StopWords;

    // Output
    pub use crate::format::{OutputFormat, write_report};
}
