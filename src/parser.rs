//! Parser trait for chat transcripts.
//!
//! A [`Parser`] turns raw export content into a [`Corpus`]. Files are read
//! as bytes and decoded as UTF-8, so an export in another encoding fails with
//! [`ChatlensError::Utf8`](crate::ChatlensError::Utf8) instead of producing garbled records.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::parser::{Parser, WhatsAppParser};
//! use std::path::Path;
//!
//! let parser = WhatsAppParser::new();
//! let corpus = parser.parse(Path::new("WhatsApp Chat with Friends.txt"))?;
//!
//! for record in &corpus {
//!     println!("{}: {}", record.body().label(), record.text());
//! }
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::core::Corpus;
use crate::error::Result;

pub use crate::parsers::WhatsAppParser;

/// Common interface of transcript parsers.
///
/// Implementors only need [`name`](Parser::name) and
/// [`parse_str`](Parser::parse_str); file and byte handling come for free.
///
/// # Example Implementation
///
/// ```rust
/// use chatlens::core::Corpus;
/// use chatlens::parser::Parser;
///
/// struct NothingParser;
///
/// impl Parser for NothingParser {
///     fn name(&self) -> &'static str {
///         "Nothing"
///     }
///
///     fn parse_str(&self, _content: &str) -> chatlens::Result<Corpus> {
///         Ok(Corpus::default())
///     }
/// }
///
/// assert!(NothingParser.parse_bytes(b"anything").unwrap().is_empty());
/// assert!(NothingParser.parse_bytes(&[0xff, 0xfe]).is_err());
/// ```
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses transcript content already decoded to a string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::SegmentMismatch`](crate::ChatlensError::SegmentMismatch) if records can't be aligned.
    fn parse_str(&self, content: &str) -> Result<Corpus>;

    /// Decodes `bytes` as UTF-8 and parses them.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Utf8`](crate::ChatlensError::Utf8) for content that isn't valid UTF-8,
    /// plus anything [`parse_str`](Parser::parse_str) returns.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Corpus> {
        let content = String::from_utf8(bytes.to_vec())?;
        self.parse_str(&content)
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`](crate::ChatlensError::Io) if the file can't be read, plus anything
    /// [`parse_bytes`](Parser::parse_bytes) returns.
    fn parse(&self, path: &Path) -> Result<Corpus> {
        let bytes = fs::read(path)?;
        tracing::debug!(parser = self.name(), path = %path.display(), bytes = bytes.len(), "read transcript");
        self.parse_bytes(&bytes)
    }

    /// Parses an export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Corpus> {
        self.parse(Path::new(path))
    }
}
