//! Structured message records produced from a transcript.
//!
//! A [`Record`] is one detected message unit. Its [`Body`] says whether a
//! person wrote it or WhatsApp generated it, and its [`TimeFields`] carry the
//! calendar fields derived from the timestamp.
//!
//! # Examples
//!
//! ```
//! use chatlens::record::{Body, Record};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(22, 0, 0)
//!     .unwrap();
//! let record = Record::new(Some(ts), Body::authored("Alice", "Hello there"));
//!
//! assert_eq!(record.user(), Some("Alice"));
//! let time = record.time().unwrap();
//! assert_eq!(time.day_name, "Sunday");
//! assert_eq!(time.period, "22-23");
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// Label used for notifications when a table needs a printable name.
///
/// It is only ever produced from [`Body::Notification`], never read back as
/// a user name.
pub const NOTIFICATION_LABEL: &str = "group_notification";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day names in Monday-first order.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const HOUR_PERIODS: [&str; 24] = [
    "00-01", "1-2", "2-3", "3-4", "4-5", "5-6", "6-7", "7-8", "8-9", "9-10", "10-11", "11-12",
    "12-13", "13-14", "14-15", "15-16", "16-17", "17-18", "18-19", "19-20", "20-21", "21-22",
    "22-23", "23-00",
];

/// Returns the one-hour bucket label for `hour`.
///
/// Hour 0 is `"00-01"`, hour 23 is `"23-00"`, every other hour `h` is
/// `"h-(h+1)"`. Hours past 23 wrap around the day.
///
/// ```
/// use chatlens::record::hour_period_label;
///
/// assert_eq!(hour_period_label(0), "00-01");
/// assert_eq!(hour_period_label(5), "5-6");
/// assert_eq!(hour_period_label(23), "23-00");
/// ```
pub fn hour_period_label(hour: u32) -> &'static str {
    HOUR_PERIODS[(hour % 24) as usize]
}

/// Returns every hour-period label in hour order.
pub fn hour_period_labels() -> &'static [&'static str; 24] {
    &HOUR_PERIODS
}

/// Calendar and clock fields derived from a message timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFields {
    /// Calendar date, time-of-day dropped.
    pub date: NaiveDate,
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    pub month_name: &'static str,
    /// Day of month, 1-31.
    pub day: u32,
    pub day_name: &'static str,
    /// Days since Monday, 0-6.
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
    /// One-hour bucket label, see [`hour_period_label`].
    pub period: &'static str,
}

impl TimeFields {
    /// Derives every field from `ts`.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        let date = ts.date();
        let hour = ts.hour();
        let weekday = date.weekday().num_days_from_monday();
        Self {
            date,
            year: date.year(),
            month: date.month(),
            month_name: MONTH_NAMES[date.month0() as usize],
            day: date.day(),
            day_name: DAY_NAMES[weekday as usize],
            weekday,
            hour,
            minute: ts.minute(),
            period: hour_period_label(hour),
        }
    }
}

/// What a message block turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    /// A message written by a participant (`Name: text`).
    Authored { user: String, text: String },
    /// A group/system notification (no `Name: ` prefix).
    Notification { text: String },
}

impl Body {
    pub fn authored(user: impl Into<String>, text: impl Into<String>) -> Self {
        Body::Authored {
            user: user.into(),
            text: text.into(),
        }
    }

    pub fn notification(text: impl Into<String>) -> Self {
        Body::Notification { text: text.into() }
    }

    /// Message text without the timestamp and user prefix.
    pub fn text(&self) -> &str {
        match self {
            Body::Authored { text, .. } | Body::Notification { text } => text,
        }
    }

    /// Author name, `None` for notifications.
    pub fn user(&self) -> Option<&str> {
        match self {
            Body::Authored { user, .. } => Some(user),
            Body::Notification { .. } => None,
        }
    }

    /// Author name, or [`NOTIFICATION_LABEL`] for notifications.
    pub fn label(&self) -> &str {
        self.user().unwrap_or(NOTIFICATION_LABEL)
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Body::Notification { .. })
    }
}

/// One message of a chat transcript.
///
/// Records are immutable once built: time fields are computed in
/// [`Record::new`] and never touched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    timestamp: Option<NaiveDateTime>,
    #[serde(flatten)]
    body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<TimeFields>,
}

impl Record {
    /// Creates a record and derives its time fields.
    pub fn new(timestamp: Option<NaiveDateTime>, body: Body) -> Self {
        Self {
            timestamp,
            body,
            time: timestamp.map(TimeFields::from_timestamp),
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Derived time fields, `None` when the timestamp couldn't be parsed.
    pub fn time(&self) -> Option<&TimeFields> {
        self.time.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.time.as_ref().map(|t| t.date)
    }

    pub fn text(&self) -> &str {
        self.body.text()
    }

    pub fn user(&self) -> Option<&str> {
        self.body.user()
    }

    pub fn is_notification(&self) -> bool {
        self.body.is_notification()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_hour_period_edges() {
        assert_eq!(hour_period_label(0), "00-01");
        assert_eq!(hour_period_label(1), "1-2");
        assert_eq!(hour_period_label(5), "5-6");
        assert_eq!(hour_period_label(22), "22-23");
        assert_eq!(hour_period_label(23), "23-00");
    }

    #[test]
    fn test_hour_period_labels_are_distinct() {
        let mut labels: Vec<_> = (0..24).map(hour_period_label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 24);
    }

    #[test]
    fn test_hour_period_middle_hours() {
        for hour in 1..23 {
            assert_eq!(hour_period_label(hour), format!("{}-{}", hour, hour + 1));
        }
    }

    #[test]
    fn test_time_fields() {
        let fields = TimeFields::from_timestamp(ts(2024, 2, 29, 23, 59));
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(fields.year, 2024);
        assert_eq!(fields.month, 2);
        assert_eq!(fields.month_name, "February");
        assert_eq!(fields.day, 29);
        assert_eq!(fields.day_name, "Thursday");
        assert_eq!(fields.weekday, 3);
        assert_eq!(fields.hour, 23);
        assert_eq!(fields.minute, 59);
        assert_eq!(fields.period, "23-00");
    }

    #[test]
    fn test_record_without_timestamp() {
        let record = Record::new(None, Body::authored("Alice", "Hi"));
        assert!(record.timestamp().is_none());
        assert!(record.time().is_none());
        assert!(record.date().is_none());
        assert_eq!(record.text(), "Hi");
    }

    #[test]
    fn test_body_accessors() {
        let authored = Body::authored("Alice", "Hello");
        assert_eq!(authored.user(), Some("Alice"));
        assert_eq!(authored.label(), "Alice");
        assert!(!authored.is_notification());

        let note = Body::notification("Group created");
        assert_eq!(note.user(), None);
        assert_eq!(note.label(), NOTIFICATION_LABEL);
        assert_eq!(note.text(), "Group created");
        assert!(note.is_notification());
    }

    #[test]
    fn test_user_named_like_label_is_still_a_user() {
        let record = Record::new(None, Body::authored(NOTIFICATION_LABEL, "hi"));
        assert!(!record.is_notification());
        assert_eq!(record.user(), Some(NOTIFICATION_LABEL));
    }
}
