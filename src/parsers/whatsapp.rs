//! `WhatsApp` TXT export parser.
//!
//! Handles Android-style exports where every message starts with a
//! day-first, 12-hour marker:
//!
//! ```text
//! 12/05/24, 10:45 pm - Alice: Hello
//! 12/05/24, 10:46 pm - Bob: First line
//! second line of the same message
//! 12/05/24, 10:47 pm - Alice added Carol
//! ```
//!
//! Lines that don't start with a marker belong to the previous message.
//! Blocks without a `Name: ` prefix become group notifications.

use crate::config::ParserConfig;
use crate::core::Corpus;
use crate::core::builder::build_corpus;
use crate::error::Result;
use crate::parser::Parser;
use crate::parsing::segment::{classify, segment};
use crate::parsing::timestamp::TimestampRecognizer;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatlens::parser::{Parser, WhatsAppParser};
///
/// let corpus = WhatsAppParser::new().parse_str(
///     "1/1/23, 10:00 PM - Alice: Hello there\n1/1/23, 10:06 PM - Group created",
/// )?;
/// assert_eq!(corpus.len(), 2);
/// assert!(corpus.records()[1].is_notification());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Default)]
pub struct WhatsAppParser {
    config: ParserConfig,
    recognizer: TimestampRecognizer,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            recognizer: TimestampRecognizer::new(),
        }
    }

    /// Replaces the timestamp recognizer.
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: TimestampRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn parse_content(&self, content: &str) -> Result<Corpus> {
        let segments = segment(content);

        let mut timestamps = Vec::with_capacity(segments.len());
        let mut bodies = Vec::with_capacity(segments.len());
        for seg in &segments {
            let body = classify(seg.block);
            if !self.config.keep_notifications && body.is_notification() {
                continue;
            }
            timestamps.push(self.recognizer.parse(seg.marker));
            bodies.push(body);
        }

        let corpus = build_corpus(timestamps, bodies)?;
        tracing::info!(
            records = corpus.len(),
            untimed = corpus.untimed_count(),
            users = corpus.users().len(),
            "parsed WhatsApp transcript"
        );
        Ok(corpus)
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, content: &str) -> Result<Corpus> {
        self.parse_content(content)
    }
}
