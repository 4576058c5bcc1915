//! Timestamp recognition for WhatsApp TXT exports.
//!
//! Every message in an Android-style export starts with a marker like
//! `12/05/24, 10:45 pm - `. This module finds those markers in raw text and
//! turns each one into a [`NaiveDateTime`].
//!
//! Parsing runs an ordered list of [`TimestampStrategy`] values and stops at
//! the first one that succeeds. The default list tries the three exact
//! day-first templates (one per dash glyph) and then a permissive fallback.
//! A marker no strategy understands yields `None`.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Narrow no-break space used by some devices between the time and AM/PM.
pub const NARROW_NBSP: char = '\u{202F}';

/// Matches a message-leading timestamp marker, dash and trailing space
/// included. Accepts hyphen, en-dash and em-dash.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{2},\s[0-9]{1,2}:[0-9]{2}\s[APap][Mm]\s[-\u{2013}\u{2014}]\s")
        .expect("marker pattern is valid")
});

static LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*\[?([0-9]{1,2})[/.\-]([0-9]{1,2})[/.\-]([0-9]{4}|[0-9]{2}),?\s*([0-9]{1,2})[:.]([0-9]{2})(?:[:.]([0-9]{2}))?\s*([ap])?\.?\s*(?:m\.?)?",
    )
    .expect("permissive pattern is valid")
});

/// Returns the byte ranges of every timestamp marker in `text`, in order.
///
/// ```
/// use chatlens::parsing::timestamp::find_markers;
///
/// let text = "1/1/23, 10:00 PM - Alice: Hi\n1/1/23, 10:05 pm – Bob: Yo";
/// let markers = find_markers(text);
/// assert_eq!(markers.len(), 2);
/// assert_eq!(&text[markers[0].clone()], "1/1/23, 10:00 PM - ");
/// ```
pub fn find_markers(text: &str) -> Vec<Range<usize>> {
    MARKER.find_iter(text).map(|m| m.range()).collect()
}

/// Replaces narrow no-break spaces with plain spaces and trims the marker.
pub fn normalize_marker(marker: &str) -> String {
    marker.replace(NARROW_NBSP, " ").trim().to_string()
}

/// One way of turning a normalized marker into a timestamp.
pub trait TimestampStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempts to parse `marker`. `None` means "not mine", never an error.
    fn parse(&self, marker: &str) -> Option<NaiveDateTime>;
}

/// Exact chrono template, e.g. `%d/%m/%y, %I:%M %p -`.
#[derive(Debug, Clone, Copy)]
pub struct FormatStrategy {
    format: &'static str,
}

impl FormatStrategy {
    pub const fn new(format: &'static str) -> Self {
        Self { format }
    }

    /// Day-first, two-digit year, 12-hour clock, one entry per dash glyph.
    pub fn day_first_12h() -> [FormatStrategy; 3] {
        [
            FormatStrategy::new("%d/%m/%y, %I:%M %p -"),
            FormatStrategy::new("%d/%m/%y, %I:%M %p \u{2013}"),
            FormatStrategy::new("%d/%m/%y, %I:%M %p \u{2014}"),
        ]
    }
}

impl TimestampStrategy for FormatStrategy {
    fn name(&self) -> &'static str {
        self.format
    }

    fn parse(&self, marker: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(marker, self.format).ok()
    }
}

/// Best-effort fallback.
///
/// Accepts `/`, `.` or `-` between date parts, two- or four-digit years,
/// optional seconds, optional AM/PM in any case and any trailing separator.
/// Tries day-first, then month-first when the day-first reading is not a
/// real date.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveStrategy;

impl PermissiveStrategy {
    fn expand_year(raw: &str) -> Option<i32> {
        let year: i32 = raw.parse().ok()?;
        Some(match raw.len() {
            // Same pivot as chrono's %y
            2 if year < 70 => 2000 + year,
            2 => 1900 + year,
            _ => year,
        })
    }

    fn to_24h(hour: u32, meridiem: Option<&str>) -> Option<u32> {
        match meridiem.map(|m| m.to_ascii_lowercase()) {
            None if hour < 24 => Some(hour),
            Some(m) if (1..=12).contains(&hour) => Some(match (m.as_str(), hour) {
                ("a", 12) => 0,
                ("a", h) => h,
                ("p", 12) => 12,
                (_, h) => h + 12,
            }),
            _ => None,
        }
    }
}

impl TimestampStrategy for PermissiveStrategy {
    fn name(&self) -> &'static str {
        "permissive"
    }

    fn parse(&self, marker: &str) -> Option<NaiveDateTime> {
        let caps = LOOSE.captures(marker)?;
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = Self::expand_year(&caps[3])?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;
        let second_of_minute: u32 = caps.get(6).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let hour = Self::to_24h(hour, caps.get(7).map(|m| m.as_str()))?;

        let date = NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second))?;
        date.and_hms_opt(hour, minute, second_of_minute)
    }
}

/// Ordered list of strategies; the first success wins.
pub struct TimestampRecognizer {
    strategies: Vec<Box<dyn TimestampStrategy>>,
}

impl TimestampRecognizer {
    /// Creates a recognizer with the default strategy list.
    pub fn new() -> Self {
        let mut strategies: Vec<Box<dyn TimestampStrategy>> = FormatStrategy::day_first_12h()
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn TimestampStrategy>)
            .collect();
        strategies.push(Box::new(PermissiveStrategy));
        Self { strategies }
    }

    /// Creates a recognizer with a custom strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn TimestampStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Parses one marker. Returns `None` if no strategy accepts it.
    pub fn parse(&self, marker: &str) -> Option<NaiveDateTime> {
        let normalized = normalize_marker(marker);
        let parsed = self.strategies.iter().find_map(|strategy| {
            let ts = strategy.parse(&normalized)?;
            tracing::trace!(strategy = strategy.name(), marker = %normalized, "timestamp parsed");
            Some(ts)
        });

        if parsed.is_none() {
            tracing::warn!(marker = %normalized, "could not parse timestamp; record kept without time fields");
        }
        parsed
    }
}

impl Default for TimestampRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimestampRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampRecognizer")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
