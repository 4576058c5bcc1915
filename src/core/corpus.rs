//! The parsed transcript and borrowed views over it.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::Record;

/// Name of the "everyone" entry in user selectors.
pub const OVERALL: &str = "Overall";

/// All records of one transcript, in transcript order.
///
/// A corpus is immutable: filtering produces a [`CorpusView`] that borrows
/// from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct authors, sorted. Notifications are not users.
    pub fn users(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(Record::user)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries for a user selector: [`OVERALL`] followed by [`users`](Self::users).
    pub fn user_options(&self) -> Vec<&str> {
        std::iter::once(OVERALL).chain(self.users()).collect()
    }

    /// Returns `true` if `user` wrote at least one message.
    pub fn has_user(&self, user: &str) -> bool {
        self.records.iter().any(|r| r.user() == Some(user))
    }

    /// Earliest and latest calendar date among records with a timestamp.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(Record::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Number of records whose timestamp could not be parsed.
    pub fn untimed_count(&self) -> usize {
        self.records.iter().filter(|r| r.timestamp().is_none()).count()
    }

    /// An unfiltered view over every record.
    pub fn view(&self) -> CorpusView<'_> {
        CorpusView {
            records: self.records.iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A filtered, read-only subsequence of a [`Corpus`], order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> CorpusView<'a> {
    pub(crate) fn new(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copies the view's records into a new corpus.
    pub fn to_corpus(&self) -> Corpus {
        Corpus::from_records(self.records.iter().map(|r| (*r).clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Body;

    fn at(y: i32, m: u32, d: u32) -> Option<chrono::NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(9, 0, 0)
    }

    fn sample() -> Corpus {
        Corpus::from_records(vec![
            Record::new(at(2024, 3, 2), Body::authored("Zoe", "hi")),
            Record::new(at(2024, 1, 5), Body::notification("Group created")),
            Record::new(None, Body::authored("Adam", "broken date")),
            Record::new(at(2024, 2, 1), Body::authored("Zoe", "again")),
        ])
    }

    #[test]
    fn test_users_sorted_without_notifications() {
        let corpus = sample();
        assert_eq!(corpus.users(), vec!["Adam", "Zoe"]);
        assert_eq!(corpus.user_options(), vec!["Overall", "Adam", "Zoe"]);
        assert!(corpus.has_user("Zoe"));
        assert!(!corpus.has_user("group_notification"));
    }

    #[test]
    fn test_date_bounds_skip_untimed() {
        let corpus = sample();
        let (lo, hi) = corpus.date_bounds().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(corpus.untimed_count(), 1);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::default();
        assert!(corpus.is_empty());
        assert!(corpus.users().is_empty());
        assert_eq!(corpus.user_options(), vec!["Overall"]);
        assert!(corpus.date_bounds().is_none());
        assert!(corpus.view().is_empty());
    }

    #[test]
    fn test_view_preserves_order() {
        let corpus = sample();
        let view = corpus.view();
        let texts: Vec<_> = view.iter().map(Record::text).collect();
        assert_eq!(texts, vec!["hi", "Group created", "broken date", "again"]);
        assert_eq!(view.to_corpus(), corpus);
    }
}
