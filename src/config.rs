//! Configuration types for parsing and analysis.
//!
//! Plain structs with builder methods, no CLI framework dependencies.
//!
//! - [`ParserConfig`] - what the transcript parser keeps
//! - [`AnalysisConfig`] - limits and markers used by the aggregation engine
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, ParserConfig};
//!
//! let parser = ParserConfig::new().with_keep_notifications(false);
//! let analysis = AnalysisConfig::new().with_top_words(10);
//!
//! assert!(!parser.keep_notifications);
//! assert_eq!(analysis.top_words, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Placeholder WhatsApp writes in place of attachments when exporting
/// without media.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Text handed to the word-cloud renderer when nothing survives filtering.
pub const WORDCLOUD_PLACEHOLDER: &str = "whatsapp chat";

/// Configuration for transcript parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Keep group notifications ("Alice added Bob", ...) as records
    /// (default: true)
    pub keep_notifications: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            keep_notifications: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether notifications are kept.
    #[must_use]
    pub fn with_keep_notifications(mut self, keep: bool) -> Self {
        self.keep_notifications = keep;
        self
    }
}

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of users in the "most busy" ranking (default: 5)
    pub top_users: usize,

    /// Number of entries in the common-words table (default: 20)
    pub top_words: usize,

    /// Text that marks a media message (default: `<Media omitted>`)
    pub media_marker: String,

    /// Fallback word-cloud text (default: `whatsapp chat`)
    pub wordcloud_placeholder: String,

    /// First hour counted as night (default: 22)
    pub night_start_hour: u32,

    /// Last hour counted as night (default: 3)
    pub night_end_hour: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_users: 5,
            top_words: 20,
            media_marker: MEDIA_OMITTED.to_string(),
            wordcloud_placeholder: WORDCLOUD_PLACEHOLDER.to_string(),
            night_start_hour: 22,
            night_end_hour: 3,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the busy-users ranking.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Sets the size of the common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        self.media_marker = marker.into();
        self
    }

    /// Sets the night window, wrapping past midnight when `start > end`.
    #[must_use]
    pub fn with_night_hours(mut self, start: u32, end: u32) -> Self {
        self.night_start_hour = start;
        self.night_end_hour = end;
        self
    }

    /// Returns `true` if `text` is the media placeholder, with or without a
    /// trailing newline.
    pub fn is_media(&self, text: &str) -> bool {
        text.strip_suffix('\n').unwrap_or(text) == self.media_marker
    }

    /// Returns `true` if `hour` falls into the night window.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        if self.night_start_hour <= self.night_end_hour {
            (self.night_start_hour..=self.night_end_hour).contains(&hour)
        } else {
            hour >= self.night_start_hour || hour <= self.night_end_hour
        }
    }
}
