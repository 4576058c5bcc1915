//! Output format types for the chatlens library.
//!
//! Library-first format selection that doesn't depend on the CLI.
//!
//! # Example
//!
//! ```rust
//! use chatlens::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("report.json").unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! // A path without an extension is a directory of CSV tables
//! assert_eq!(OutputFormat::from_path("report_tables").unwrap(), OutputFormat::Csv);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};
use crate::report::Report;

/// Output format for analysis reports.
///
/// - [`Json`](OutputFormat::Json) - one document with every table
/// - [`Csv`](OutputFormat::Csv) - a directory with one semicolon-delimited
///   file per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,

    /// CSV tables with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Csv]
    }

    /// Detects format from an output path.
    ///
    /// `.json` is JSON; `.csv` or no extension at all is a CSV directory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidFormat`] for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(OutputFormat::Json),
            Some("csv") | None => Ok(OutputFormat::Csv),
            Some(other) => Err(ChatlensError::invalid_format(
                "output",
                format!("Unknown file extension: '.{other}'. Expected .json, .csv or a directory"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes a report in the specified format.
///
/// For [`OutputFormat::Csv`], `path` is a directory. Returns the files
/// written.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The output cannot be written
#[allow(unused_variables)]
pub fn write_report(
    report: &Report,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<Vec<std::path::PathBuf>> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => {
            crate::core::output::write_json(report, path)?;
            Ok(vec![path.to_path_buf()])
        }
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv_tables(report, path),
        #[allow(unreachable_patterns)]
        _ => Err(ChatlensError::invalid_format(
            "output",
            format!(
                "Output format {} requires the '{}-output' feature to be enabled",
                format,
                format.extension()
            ),
        )),
    }
}
