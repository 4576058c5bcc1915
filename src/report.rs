//! Full analysis report.
//!
//! [`Report::build`] runs every [`Analyzer`] operation for one filter request
//! and collects the tables into a single serializable value, which the output
//! writers turn into JSON or CSV.

use serde::Serialize;

use crate::core::analysis::{
    Analyzer, BasicStats, BusyUsers, DailyCount, EmojiCount, Heatmap, Insights, LabelCount,
    MonthlyCount, WordCount,
};
use crate::core::corpus::Corpus;
use crate::core::filter::{DateRange, FilterCriteria, UserSelection};
use crate::error::{ChatlensError, Result};

/// Every summary table for one user/date selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    /// No record survived the filter.
    pub is_empty: bool,
    pub stats: BasicStats,
    /// Only present for `Overall`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_users: Option<BusyUsers>,
    pub monthly_timeline: Vec<MonthlyCount>,
    pub daily_timeline: Vec<DailyCount>,
    pub week_activity: Vec<LabelCount>,
    pub month_activity: Vec<LabelCount>,
    pub heatmap: Heatmap,
    pub common_words: Vec<WordCount>,
    pub emojis: Vec<EmojiCount>,
    pub wordcloud_text: String,
    pub insights: Insights,
}

impl Report {
    /// Filters `corpus` by `criteria` and computes every table.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::UnknownUser`] if a named user never wrote a
    /// message in `corpus`.
    ///
    /// # Example
    ///
    /// ```
    /// use chatlens::core::{Analyzer, FilterCriteria};
    /// use chatlens::parser::{Parser, WhatsAppParser};
    /// use chatlens::report::Report;
    ///
    /// # fn main() -> chatlens::Result<()> {
    /// let corpus = WhatsAppParser::new().parse_str("1/1/23, 10:00 PM - Alice: Hi 👋")?;
    /// let report = Report::build(&Analyzer::new(), &corpus, &FilterCriteria::overall(), &[])?;
    ///
    /// assert_eq!(report.stats.messages, 1);
    /// assert_eq!(report.emojis[0].emoji, '👋');
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(
        analyzer: &Analyzer,
        corpus: &Corpus,
        criteria: &FilterCriteria,
        exclude: &[String],
    ) -> Result<Self> {
        let user = criteria.user();
        if let UserSelection::User(name) = user {
            if !corpus.has_user(name) {
                return Err(ChatlensError::unknown_user(name));
            }
        }

        let view = criteria.apply(corpus);
        if view.is_empty() {
            tracing::warn!(user = %user, "no messages match the filter");
        }

        Ok(Self {
            user: user.to_string(),
            dates: criteria.dates().copied(),
            is_empty: view.is_empty(),
            stats: analyzer.fetch_stats(user, &view),
            busy_users: analyzer.most_busy_users(user, &view),
            monthly_timeline: analyzer.monthly_timeline(user, &view),
            daily_timeline: analyzer.daily_timeline(user, &view),
            week_activity: analyzer.week_activity_map(user, &view),
            month_activity: analyzer.month_activity_map(user, &view),
            heatmap: analyzer.activity_heatmap(user, &view),
            common_words: analyzer.most_common_words(user, &view, exclude),
            emojis: analyzer.emoji_frequency(user, &view),
            wordcloud_text: analyzer.wordcloud_text(user, &view, exclude),
            insights: analyzer.conversation_insights(user, &view),
        })
    }
}
