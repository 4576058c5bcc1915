//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::Report;

/// Writes the report to a JSON file, pretty-printed.
///
/// # Format
/// ```json
/// {
///   "user": "Overall",
///   "is_empty": false,
///   "stats": {"messages": 3, "words": 2, "media": 1, "links": 0},
///   ...
/// }
/// ```
pub fn write_json(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
