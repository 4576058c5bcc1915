//! Filter records by user and date range.
//!
//! This module provides [`FilterCriteria`] for defining filter criteria and
//! [`FilterCriteria::apply`] for producing a filtered [`CorpusView`].
//!
//! # Filter Types
//!
//! | Filter | Type | Description |
//! |--------|------|-------------|
//! | User | [`UserSelection`] | `Overall` or one author, exact match |
//! | Dates | [`DateRange`] | Calendar dates, both ends inclusive |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{DateRange, FilterCriteria, UserSelection};
//! use chatlens::parser::{Parser, WhatsAppParser};
//!
//! # fn main() -> chatlens::Result<()> {
//! let corpus = WhatsAppParser::new().parse_str(
//!     "1/1/23, 10:00 PM - Alice: Hello\n3/1/23, 9:00 AM - Bob: Hi\n",
//! )?;
//!
//! let criteria = FilterCriteria::new(UserSelection::Overall)
//!     .with_dates(DateRange::parse("2023-01-02", "2023-01-31")?);
//! let view = criteria.apply(&corpus);
//!
//! assert_eq!(view.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Records without timestamps always pass the date filter; time-keyed
//!   tables skip them on their own
//! - `Overall` keeps notifications; a named user never matches them
//! - User matching is exact (case-sensitive)
//! - Both filters are combined with AND logic

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::corpus::{Corpus, CorpusView, OVERALL};
use crate::error::{ChatlensError, Result};
use crate::record::Record;

/// Whose messages to look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserSelection {
    /// Everyone, notifications included.
    #[default]
    Overall,
    /// A single author.
    User(String),
}

impl UserSelection {
    /// Parses a selector entry: `"Overall"` or a user name.
    ///
    /// `"Overall"` is reserved for the selector, so an author who is really
    /// called that can only be picked with [`UserSelection::User`].
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == OVERALL {
            UserSelection::Overall
        } else {
            UserSelection::User(name)
        }
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, UserSelection::Overall)
    }

    /// Returns `true` if `record` belongs to this selection.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            UserSelection::Overall => true,
            UserSelection::User(name) => record.user() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for UserSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelection::Overall => f.write_str(OVERALL),
            UserSelection::User(name) => f.write_str(name),
        }
    }
}

impl FromStr for UserSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(UserSelection::from_name(s))
    }
}

/// Inclusive calendar-date range. `start <= end` is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ChatlensError::invalid_date_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Creates a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] for malformed input and
    /// [`ChatlensError::InvalidDateRange`] if the start is after the end.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parses a date string in `YYYY-MM-DD` format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// User and date criteria applied before any aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    user: UserSelection,
    dates: Option<DateRange>,
}

impl FilterCriteria {
    /// Criteria for `user` over the whole transcript.
    pub fn new(user: UserSelection) -> Self {
        Self { user, dates: None }
    }

    /// `Overall`, no date range: every record passes.
    pub fn overall() -> Self {
        Self::default()
    }

    /// Restricts to a date range.
    #[must_use]
    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = Some(dates);
        self
    }

    /// Restricts to the corpus' own first and last day, which is what a date
    /// picker shows before the user touches it.
    #[must_use]
    pub fn with_full_range(mut self, corpus: &Corpus) -> Self {
        self.dates = corpus
            .date_bounds()
            .map(|(start, end)| DateRange { start, end });
        self
    }

    pub fn user(&self) -> &UserSelection {
        &self.user
    }

    pub fn dates(&self) -> Option<&DateRange> {
        self.dates.as_ref()
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        !self.user.is_overall() || self.dates.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.user.matches(record) {
            return false;
        }

        match (&self.dates, record.date()) {
            (None, _) => true,
            (Some(range), Some(date)) => range.contains(date),
            // No timestamp: keep for the non-time tables
            (Some(_), None) => true,
        }
    }

    /// Filters `corpus` without copying or mutating it.
    pub fn apply<'a>(&self, corpus: &'a Corpus) -> CorpusView<'a> {
        let view = CorpusView::new(corpus.iter().filter(|r| self.matches(r)).collect());
        tracing::debug!(
            user = %self.user,
            total = corpus.len(),
            kept = view.len(),
            "applied filter"
        );
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_corpus;
    use crate::record::Body;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn corpus() -> Corpus {
        let at = |s: &str| date(s).and_hms_opt(23, 30, 0);
        build_corpus(
            vec![at("2024-01-01"), at("2024-06-15"), at("2024-06-15"), None, at("2024-12-31")],
            vec![
                Body::authored("Alice", "Old Alice"),
                Body::authored("Alice", "New Alice"),
                Body::authored("Bob", "New Bob"),
                Body::authored("Bob", "No date"),
                Body::notification("Bob left"),
            ],
        )
        .unwrap()
    }

    fn texts<'a>(view: &'a CorpusView<'_>) -> Vec<&'a str> {
        view.iter().map(Record::text).collect()
    }

    #[test]
    fn test_overall_keeps_everything() {
        let corpus = corpus();
        let view = FilterCriteria::overall().apply(&corpus);
        assert_eq!(view.len(), corpus.len());
        assert!(!FilterCriteria::overall().is_active());
    }

    #[test]
    fn test_filter_by_user_is_exact() {
        let corpus = corpus();
        let view = FilterCriteria::new(UserSelection::from_name("Bob")).apply(&corpus);
        assert_eq!(texts(&view), vec!["New Bob", "No date"]);

        let view = FilterCriteria::new(UserSelection::from_name("bob")).apply(&corpus);
        assert!(view.is_empty());
    }

    #[test]
    fn test_user_filter_never_matches_notifications() {
        let corpus = corpus();
        let view =
            FilterCriteria::new(UserSelection::from_name("group_notification")).apply(&corpus);
        assert!(view.is_empty());
    }

    #[test]
    fn test_date_range_inclusive_ignores_time_of_day() {
        let corpus = corpus();
        let criteria = FilterCriteria::overall()
            .with_dates(DateRange::parse("2024-06-15", "2024-12-31").unwrap());
        let view = criteria.apply(&corpus);
        assert_eq!(texts(&view), vec!["New Alice", "New Bob", "No date", "Bob left"]);
    }

    #[test]
    fn test_no_timestamp_passes_date_filter() {
        let corpus = corpus();
        let criteria = FilterCriteria::new(UserSelection::from_name("Bob"))
            .with_dates(DateRange::parse("2024-06-01", "2024-06-30").unwrap());
        assert_eq!(texts(&criteria.apply(&corpus)), vec!["New Bob", "No date"]);
    }

    #[test]
    fn test_author_named_overall() {
        let corpus = build_corpus(
            vec![None, None],
            vec![Body::authored("Overall", "hi"), Body::authored("Bob", "yo")],
        )
        .unwrap();
        assert_eq!(UserSelection::from_name("Overall"), UserSelection::Overall);

        let named = FilterCriteria::new(UserSelection::User("Overall".into())).apply(&corpus);
        assert_eq!(texts(&named), vec!["hi"]);
    }

    #[test]
    fn test_full_range_keeps_untimed_records() {
        let corpus = corpus();
        let view = FilterCriteria::overall().with_full_range(&corpus).apply(&corpus);
        assert_eq!(view, corpus.view());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = DateRange::parse("2024-02-01", "2024-01-01").unwrap_err();
        assert!(matches!(err, ChatlensError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_invalid_date_format() {
        let result = DateRange::parse("01-01-2024", "2024-02-01");
        assert!(matches!(result, Err(ChatlensError::InvalidDate { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2024-06-15", "2024-06-15").unwrap();
        assert!(range.contains(date("2024-06-15")));
        assert!(!range.contains(date("2024-06-16")));
    }

    #[test]
    fn test_full_range_round_trip() {
        let corpus = build_corpus(
            vec![
                date("2024-03-01").and_hms_opt(0, 0, 0),
                date("2024-01-01").and_hms_opt(12, 0, 0),
            ],
            vec![Body::authored("A", "x"), Body::notification("y")],
        )
        .unwrap();
        let view = FilterCriteria::overall().with_full_range(&corpus).apply(&corpus);
        assert_eq!(view.to_corpus(), corpus);
    }

    #[test]
    fn test_user_selection_from_name() {
        assert_eq!(UserSelection::from_name("Overall"), UserSelection::Overall);
        assert_eq!(
            "Alice".parse::<UserSelection>().unwrap(),
            UserSelection::User("Alice".into())
        );
        assert_eq!(UserSelection::Overall.to_string(), "Overall");
    }
}
