//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Output format options
//! - [`init_tracing`] - Log subscriber setup for the binary

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ParserConfig;
use crate::core::{Corpus, DateRange, FilterCriteria, UserSelection, parse_date};
use crate::error::{ChatlensError, Result};
use crate::format::OutputFormat;

/// Default output path when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "chat_report.json";

/// Analyze a WhatsApp chat export: activity timelines, busiest users,
/// common words and emoji.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt --list-users
    chatlens chat.txt --user Alice --from 2024-01-01 --to 2024-06-30
    chatlens chat.txt -f csv -o report_tables
    chatlens chat.txt --exclude ok --exclude haha --stop-words stop.txt")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Output file (JSON) or directory (CSV tables)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format; inferred from the output path when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Analyze a single user instead of the whole chat
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Stop-word file, one word per line (default: built-in Hinglish list)
    #[arg(long, value_name = "PATH")]
    pub stop_words: Option<PathBuf>,

    /// Extra words to leave out of word counts and the word cloud
    #[arg(long, value_name = "WORD")]
    pub exclude: Vec<String>,

    /// Print the users found in the chat and exit
    #[arg(long)]
    pub list_users: bool,

    /// Drop group notifications ("X added Y", ...) while parsing
    #[arg(long)]
    pub drop_notifications: bool,

    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parser settings selected by the flags.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_keep_notifications(!self.drop_notifications)
    }

    /// Builds the filter for `corpus`.
    ///
    /// A missing `--from` or `--to` falls back to the corpus' first or last
    /// day, as a date picker would.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] or
    /// [`ChatlensError::InvalidDateRange`] for bad dates.
    pub fn criteria(&self, corpus: &Corpus) -> Result<FilterCriteria> {
        let user = self
            .user
            .as_deref()
            .map_or(UserSelection::Overall, UserSelection::from_name);
        let criteria = FilterCriteria::new(user);

        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;
        let bounds = corpus.date_bounds();

        let range = match (from, to) {
            (None, None) => return Ok(criteria),
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, bounds.map_or(start, |(_, end)| end)),
            (None, Some(end)) => (bounds.map_or(end, |(start, _)| start), end),
        };
        Ok(criteria.with_dates(DateRange::new(range.0, range.1)?))
    }

    /// Output format and path.
    ///
    /// With the default path and `--format csv`, the tables go to a
    /// `chat_report` directory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidFormat`] if the format can't be
    /// inferred from the path.
    pub fn output_target(&self) -> Result<(OutputFormat, PathBuf)> {
        let format = match self.format {
            Some(arg) => arg.into(),
            None => OutputFormat::from_path(&self.output)?,
        };
        let path = if self.output == Path::new(DEFAULT_OUTPUT) && format == OutputFormat::Csv {
            self.output.with_extension("")
        } else {
            self.output.clone()
        };
        Ok((format, path))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum FormatArg {
    /// Single pretty-printed JSON document (default)
    #[default]
    Json,

    /// Directory of semicolon-delimited tables
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> OutputFormat {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Installs the global log subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `verbose`.
///
/// # Errors
///
/// Returns [`ChatlensError::Io`] if a subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "chatlens=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ChatlensError::Io(std::io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_corpus;
    use crate::record::Body;
    use chrono::NaiveDate;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["chatlens", "chat.txt"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn corpus() -> Corpus {
        let at = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).and_then(|x| x.and_hms_opt(9, 0, 0));
        build_corpus(
            vec![at(1), at(20)],
            vec![Body::authored("Alice", "a"), Body::authored("Bob", "b")],
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(args.parser_config().keep_notifications);
        assert_eq!(args.output_target().unwrap().0, OutputFormat::Json);
        assert!(!args.criteria(&corpus()).unwrap().is_active());
    }

    #[test]
    fn test_csv_default_path_is_directory() {
        let (format, path) = args(&["-f", "csv"]).output_target().unwrap();
        assert_eq!(format, OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("chat_report"));
    }

    #[test]
    fn test_format_inferred_from_path() {
        let (format, path) = args(&["-o", "tables"]).output_target().unwrap();
        assert_eq!(format, OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("tables"));
        assert!(args(&["-o", "out.xml"]).output_target().is_err());
    }

    #[test]
    fn test_open_ended_range_uses_corpus_bounds() {
        let criteria = args(&["--from", "2024-03-10"]).criteria(&corpus()).unwrap();
        let dates = criteria.dates().unwrap();
        assert_eq!(dates.start(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(dates.end(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = args(&["--from", "2024-03-10", "--to", "2024-03-01"])
            .criteria(&corpus())
            .unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_user_and_excludes() {
        let args = args(&["--user", "Alice", "--exclude", "ok", "--exclude", "haha"]);
        let criteria = args.criteria(&corpus()).unwrap();
        assert_eq!(criteria.user(), &UserSelection::User("Alice".into()));
        assert_eq!(args.exclude, vec!["ok", "haha"]);
    }

    #[test]
    fn test_drop_notifications_flag() {
        assert!(!args(&["--drop-notifications"]).parser_config().keep_notifications);
    }
}
