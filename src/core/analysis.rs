//! Aggregation engine.
//!
//! [`Analyzer`] computes every summary table from a filtered
//! [`CorpusView`]. Each operation takes the selected user as well and
//! re-applies the user filter itself, so calling one directly on an unfiltered
//! view gives the same answer as going through [`FilterCriteria`] first.
//!
//! Time-keyed operations (timelines, activity maps, heatmap, night messages)
//! skip records without a parsed timestamp. Everything else counts them.
//!
//! # Example
//!
//! ```
//! use chatlens::core::{Analyzer, UserSelection};
//! use chatlens::parser::{Parser, WhatsAppParser};
//!
//! # fn main() -> chatlens::Result<()> {
//! let corpus = WhatsAppParser::new().parse_str(
//!     "1/1/23, 10:00 PM - Alice: Hello there\n\
//!      1/1/23, 10:05 PM - Bob: <Media omitted>\n\
//!      1/1/23, 10:06 PM - Group created",
//! )?;
//!
//! let stats = Analyzer::new().fetch_stats(&UserSelection::Overall, &corpus.view());
//! assert_eq!((stats.messages, stats.words, stats.media, stats.links), (3, 2, 1, 0));
//! # Ok(())
//! # }
//! ```
//!
//! [`FilterCriteria`]: super::filter::FilterCriteria

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::corpus::CorpusView;
use super::filter::UserSelection;
use super::frequency::{most_common, percent, round2};
use crate::collaborators::{
    EmojiClassifier, LinkExtractor, RegexLinkExtractor, UnicodeEmojiClassifier,
};
use crate::config::AnalysisConfig;
use crate::record::{DAY_NAMES, NOTIFICATION_LABEL, Record, TimeFields, hour_period_label};
use crate::stopwords::StopWords;

/// Headline numbers for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BasicStats {
    /// Records in the selection, notifications included.
    pub messages: usize,
    /// Whitespace-separated tokens over all texts.
    pub words: usize,
    /// Media placeholder messages.
    pub media: usize,
    /// URLs over all texts.
    pub links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub user: String,
    pub count: usize,
    /// Share of all records in the view, rounded to two decimals.
    pub percent: f64,
}

/// Most active senders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusyUsers {
    /// The top authors by message count.
    pub top: Vec<UserCount>,
    /// Every author with their share, highest first.
    pub shares: Vec<UserShare>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// `"<month_name>-<year>"`, e.g. `"January-2023"`.
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// A named bucket and how many messages fell into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: char,
    pub count: usize,
}

/// Day-of-week by hour-period message counts.
///
/// Rows are the days that occur, Monday first; columns the hour periods that
/// occur, in hour order. Combinations with no messages hold 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<&'static str>,
    pub columns: Vec<&'static str>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    /// Count for a day name and period label, 0 if either is absent.
    pub fn get(&self, day: &str, period: &str) -> usize {
        let row = self.rows.iter().position(|r| *r == day);
        let col = self.columns.iter().position(|c| *c == period);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extra conversation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Mean text length in characters, rounded to two decimals.
    pub avg_message_length: f64,
    /// Messages sent in the configured night window.
    pub night_messages: usize,
    /// Day name with the most messages.
    pub most_active_day: Option<&'static str>,
}

/// Computes summary tables over filtered records.
///
/// Holds the stop-word store and the URL/emoji lookups. It never changes
/// after construction, so one instance can serve any number of requests.
pub struct Analyzer {
    stop_words: StopWords,
    links: Box<dyn LinkExtractor>,
    emoji: Box<dyn EmojiClassifier>,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Creates an analyzer with no stop words and the default lookups.
    pub fn new() -> Self {
        Self {
            stop_words: StopWords::empty(),
            links: Box::new(RegexLinkExtractor),
            emoji: Box::new(UnicodeEmojiClassifier),
            config: AnalysisConfig::default(),
        }
    }

    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    #[must_use]
    pub fn with_link_extractor(mut self, links: impl LinkExtractor + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    #[must_use]
    pub fn with_emoji_classifier(mut self, emoji: impl EmojiClassifier + 'static) -> Self {
        self.emoji = Box::new(emoji);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Message, word, media and link counts.
    ///
    /// Every record counts as a message. Words and links come from authored
    /// text only, media placeholders excluded, the same tokens the word
    /// tables see before stop words are removed.
    pub fn fetch_stats(&self, user: &UserSelection, view: &CorpusView<'_>) -> BasicStats {
        selected(user, view).fold(BasicStats::default(), |mut stats, record| {
            let text = record.text();
            stats.messages += 1;
            if self.config.is_media(text) {
                stats.media += 1;
            } else if !record.is_notification() {
                stats.words += text.split_whitespace().count();
                stats.links += self.links.find_urls(text).len();
            }
            stats
        })
    }

    /// Top senders and everyone's share of the selection.
    ///
    /// Notifications count as one extra sender labelled
    /// [`NOTIFICATION_LABEL`], so the shares cover every record in the view.
    /// The bucket is keyed apart from authors, so an author who happens to
    /// use that name gets a row of their own.
    ///
    /// Only defined for [`UserSelection::Overall`]; returns `None` otherwise.
    pub fn most_busy_users(
        &self,
        user: &UserSelection,
        view: &CorpusView<'_>,
    ) -> Option<BusyUsers> {
        if !user.is_overall() {
            return None;
        }

        let counts = most_common(view.iter().map(Record::user));
        let total = view.len();
        let label = |sender: Option<&str>| sender.unwrap_or(NOTIFICATION_LABEL).to_string();

        let top = counts
            .iter()
            .take(self.config.top_users)
            .map(|(sender, count)| UserCount {
                user: label(*sender),
                count: *count,
            })
            .collect();
        let shares = counts
            .iter()
            .map(|(sender, count)| UserShare {
                user: label(*sender),
                count: *count,
                percent: percent(*count, total),
            })
            .collect();

        Some(BusyUsers { top, shares })
    }

    /// Messages per calendar month, oldest first.
    pub fn monthly_timeline(&self, user: &UserSelection, view: &CorpusView<'_>) -> Vec<MonthlyCount> {
        let mut months: BTreeMap<(i32, u32), (&'static str, usize)> = BTreeMap::new();
        for time in timed(user, view) {
            months
                .entry((time.year, time.month))
                .or_insert((time.month_name, 0))
                .1 += 1;
        }

        months
            .into_iter()
            .map(|((year, month), (month_name, count))| MonthlyCount {
                year,
                month,
                month_name,
                label: format!("{month_name}-{year}"),
                count,
            })
            .collect()
    }

    /// Messages per calendar day, oldest first.
    pub fn daily_timeline(&self, user: &UserSelection, view: &CorpusView<'_>) -> Vec<DailyCount> {
        let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for time in timed(user, view) {
            *days.entry(time.date).or_default() += 1;
        }
        days.into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect()
    }

    /// Messages per day of the week, busiest first.
    pub fn week_activity_map(&self, user: &UserSelection, view: &CorpusView<'_>) -> Vec<LabelCount> {
        label_counts(timed(user, view).map(|t| t.day_name))
    }

    /// Messages per month name, busiest first.
    pub fn month_activity_map(&self, user: &UserSelection, view: &CorpusView<'_>) -> Vec<LabelCount> {
        label_counts(timed(user, view).map(|t| t.month_name))
    }

    /// Day-of-week by hour-period pivot.
    pub fn activity_heatmap(&self, user: &UserSelection, view: &CorpusView<'_>) -> Heatmap {
        let mut counts: HashMap<(u32, u32), usize> = HashMap::new();
        let mut days = BTreeSet::new();
        let mut hours = BTreeSet::new();

        for time in timed(user, view) {
            *counts.entry((time.weekday, time.hour)).or_default() += 1;
            days.insert(time.weekday);
            hours.insert(time.hour);
        }

        let cells = days
            .iter()
            .map(|day| {
                hours
                    .iter()
                    .map(|hour| counts.get(&(*day, *hour)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Heatmap {
            rows: days.iter().map(|d| DAY_NAMES[*d as usize]).collect(),
            columns: hours.iter().map(|h| hour_period_label(*h)).collect(),
            cells,
        }
    }

    /// Most frequent words, stop words and `exclude` removed.
    pub fn most_common_words(
        &self,
        user: &UserSelection,
        view: &CorpusView<'_>,
        exclude: &[String],
    ) -> Vec<WordCount> {
        let mut counts = most_common(self.filtered_tokens(user, view, exclude));
        counts.truncate(self.config.top_words);
        counts
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect()
    }

    /// Every emoji in the selection with its count, most used first.
    pub fn emoji_frequency(&self, user: &UserSelection, view: &CorpusView<'_>) -> Vec<EmojiCount> {
        let emojis = selected(user, view)
            .flat_map(|r| r.text().chars())
            .filter(|c| self.emoji.is_emoji(*c));

        most_common(emojis)
            .into_iter()
            .map(|(emoji, count)| EmojiCount { emoji, count })
            .collect()
    }

    /// Text for the word-cloud renderer.
    ///
    /// Same filtering as [`most_common_words`](Self::most_common_words). Falls
    /// back to the configured placeholder so the renderer never receives an
    /// empty string.
    pub fn wordcloud_text(
        &self,
        user: &UserSelection,
        view: &CorpusView<'_>,
        exclude: &[String],
    ) -> String {
        let text = self.filtered_tokens(user, view, exclude).join(" ");
        if text.trim().is_empty() {
            self.config.wordcloud_placeholder.clone()
        } else {
            text
        }
    }

    /// Average length, night activity and busiest weekday.
    pub fn conversation_insights(&self, user: &UserSelection, view: &CorpusView<'_>) -> Insights {
        let (messages, chars) = selected(user, view)
            .fold((0usize, 0usize), |(n, c), r| (n + 1, c + r.text().chars().count()));
        let avg_message_length = if messages == 0 {
            0.0
        } else {
            round2(chars as f64 / messages as f64)
        };

        let night_messages = timed(user, view)
            .filter(|t| self.config.is_night_hour(t.hour))
            .count();

        let most_active_day = most_common(timed(user, view).map(|t| t.day_name))
            .first()
            .map(|(day, _)| *day);

        Insights {
            avg_message_length,
            night_messages,
            most_active_day,
        }
    }

    /// Lower-cased tokens of authored, non-media messages minus stop words
    /// and exclusions, in transcript order.
    fn filtered_tokens(
        &self,
        user: &UserSelection,
        view: &CorpusView<'_>,
        exclude: &[String],
    ) -> Vec<String> {
        let exclude: HashSet<String> = exclude.iter().map(|w| w.to_lowercase()).collect();

        selected(user, view)
            .filter(|r| !r.is_notification() && !self.config.is_media(r.text()))
            .flat_map(|r| {
                r.text()
                    .to_lowercase()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|w| !self.stop_words.contains(w) && !exclude.contains(w))
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("stop_words", &self.stop_words.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn selected<'a, 'v>(
    user: &'v UserSelection,
    view: &'v CorpusView<'a>,
) -> impl Iterator<Item = &'a Record> + 'v {
    view.iter().filter(move |r| user.matches(r))
}

fn timed<'a, 'v>(
    user: &'v UserSelection,
    view: &'v CorpusView<'a>,
) -> impl Iterator<Item = &'a TimeFields> + 'v {
    selected(user, view).filter_map(Record::time)
}

fn label_counts(labels: impl Iterator<Item = &'static str>) -> Vec<LabelCount> {
    most_common(labels)
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect()
}
