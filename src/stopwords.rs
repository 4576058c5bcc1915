//! Stop-word store.
//!
//! A fixed set of filler words removed from word-frequency views. Loaded once
//! by the caller and handed to the [`Analyzer`](crate::core::Analyzer); it is
//! never modified afterwards.
//!
//! ```
//! use chatlens::stopwords::StopWords;
//!
//! let words = StopWords::from_text("Hai\nthe\n\n  and  \n");
//! assert_eq!(words.len(), 3);
//! assert!(words.contains("hai"));
//! assert!(words.contains("AND"));
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ChatlensError, Result};

const BUILTIN_HINGLISH: &str = include_str!("../data/stop_hinglish.txt");

/// Immutable, lower-cased set of words to ignore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty store; nothing is filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled Hinglish/English list.
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_HINGLISH)
    }

    /// Parses a line-oriented list. Lines are trimmed and lower-cased,
    /// blank lines skipped.
    pub fn from_text(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Builds a store from individual words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads a stop-word file.
    ///
    /// A missing file is not an error: it logs a warning and returns an
    /// empty store. Other I/O and decoding failures are reported.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes)
                    .map_err(|e| ChatlensError::utf8(path.display().to_string(), e))?;
                let store = Self::from_text(&text);
                tracing::debug!(path = %path.display(), words = store.len(), "loaded stop words");
                Ok(store)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "stop-word file not found; continuing without stop words");
                Ok(Self::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
