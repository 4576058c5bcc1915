//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # Which conditions are errors
//!
//! - **Reported to the caller**: undecodable input, malformed or inverted
//!   date ranges, unknown user selections, I/O and output failures
//! - **Fatal for one transcript**: [`ChatlensError::SegmentMismatch`], which
//!   only happens if the recognizer and segmenter disagree
//! - **Not errors at all**: unparseable timestamps, empty filter results and
//!   transcripts without emoji. These degrade to `None` or empty tables.

use std::io;

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::core::Corpus;
///
/// fn my_function() -> Result<Corpus> {
///     Ok(Corpus::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the transcript doesn't exist or the
    /// report can't be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript is not valid UTF-8.
    ///
    /// No partial result is produced.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The number of parsed timestamps differs from the number of message
    /// blocks.
    ///
    /// This points to a parser defect rather than bad input.
    #[error(
        "Internal parser error: {timestamps} timestamps but {segments} message blocks; refusing to build misaligned records"
    )]
    SegmentMismatch {
        /// Number of timestamps produced by the recognizer
        timestamps: usize,
        /// Number of blocks produced by the segmenter
        segments: usize,
    },

    /// Invalid date in filter input.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The start of a date range lies after its end.
    #[error("Invalid date range: start {start} is after end {end}. End date should be on or after the start date")]
    InvalidDateRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// The selected user does not appear in the transcript.
    #[error("Unknown user '{user}'. Use --list-users to see who is in this chat")]
    UnknownUser {
        /// The requested user name
        user: String,
    },

    /// Unknown or disabled output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was requested (e.g. "output")
        format: &'static str,
        /// Details about what went wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "transcript".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decoding error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates a segment mismatch error.
    pub fn segment_mismatch(timestamps: usize, segments: usize) -> Self {
        ChatlensError::SegmentMismatch {
            timestamps,
            segments,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid date range error.
    pub fn invalid_date_range(start: NaiveDate, end: NaiveDate) -> Self {
        ChatlensError::InvalidDateRange { start, end }
    }

    /// Creates an unknown user error.
    pub fn unknown_user(user: impl Into<String>) -> Self {
        ChatlensError::UnknownUser { user: user.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a decoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatlensError::Utf8 { .. })
    }

    /// Returns `true` if this is an internal parser consistency error.
    pub fn is_segment_mismatch(&self) -> bool {
        matches!(self, ChatlensError::SegmentMismatch { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            ChatlensError::InvalidDate { .. } | ChatlensError::InvalidDateRange { .. }
        )
    }

    /// Returns `true` if the error was caused by caller input and can be
    /// fixed by adjusting the request.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ChatlensError::Utf8 { .. }
                | ChatlensError::InvalidDate { .. }
                | ChatlensError::InvalidDateRange { .. }
                | ChatlensError::UnknownUser { .. }
                | ChatlensError::InvalidFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatlensError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_utf8_error_display() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = ChatlensError::utf8("reading chat.txt", utf8_err);
        let display = err.to_string();
        assert!(display.contains("UTF-8"));
        assert!(display.contains("reading chat.txt"));
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xc3, 0x28]).unwrap_err();
        let err: ChatlensError = utf8_err.into();
        assert!(err.is_utf8());
        assert!(err.to_string().contains("transcript"));
    }

    #[test]
    fn test_segment_mismatch_display() {
        let err = ChatlensError::segment_mismatch(3, 2);
        let display = err.to_string();
        assert!(display.contains("3 timestamps"));
        assert!(display.contains("2 message blocks"));
        assert!(err.is_segment_mismatch());
        assert!(!err.is_user_input());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ChatlensError::invalid_date("not-a-date");
        let display = err.to_string();
        assert!(display.contains("not-a-date"));
        assert!(display.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_date_range_display() {
        let err = ChatlensError::invalid_date_range(date(2024, 5, 2), date(2024, 5, 1));
        let display = err.to_string();
        assert!(display.contains("2024-05-02"));
        assert!(display.contains("2024-05-01"));
        assert!(err.is_invalid_date());
        assert!(err.is_user_input());
    }

    #[test]
    fn test_unknown_user_display() {
        let err = ChatlensError::unknown_user("Mallory");
        assert!(err.to_string().contains("Mallory"));
        assert!(err.is_user_input());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ChatlensError::from(io_err);
        assert!(err.source().is_some());

        let utf8_err = String::from_utf8(vec![0xff]).unwrap_err();
        let err = ChatlensError::utf8("input", utf8_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = ChatlensError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_utf8());
        assert!(!io_err.is_invalid_date());
        assert!(!io_err.is_user_input());

        let date_err = ChatlensError::invalid_date("bad");
        assert!(date_err.is_invalid_date());
        assert!(!date_err.is_io());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ChatlensError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_from_csv_error() {
        let io_err = std::io::Error::other("test");
        let csv_err = csv::Error::from(io_err);
        let err: ChatlensError = csv_err.into();
        assert!(err.to_string().contains("CSV error"));
    }

    #[test]
    fn test_invalid_format_display() {
        let err = ChatlensError::invalid_format("output", "Unknown format: 'xml'");
        assert_eq!(err.to_string(), "Invalid output format: Unknown format: 'xml'");
        assert!(err.is_user_input());
    }

    #[test]
    fn test_error_debug() {
        let err = ChatlensError::invalid_date("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidDate"));
    }
}
