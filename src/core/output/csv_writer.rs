//! CSV output writer.
//!
//! A report is a set of tables, so CSV output is a directory with one
//! semicolon-delimited file per table.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::analysis::Heatmap;
use crate::error::Result;
use crate::report::Report;

/// Writes every report table to `output_dir`, creating it if needed.
///
/// Returns the paths written, in a fixed order. `busy_users.csv` and
/// `user_shares.csv` are only written for `Overall` reports.
///
/// # Format
/// - Delimiter: `;`
/// - Header row with the field names
/// - Encoding: UTF-8
pub fn write_csv_tables(report: &Report, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    let out = &mut written;

    emit(dir, "stats", out, |p| write_rows(p, std::slice::from_ref(&report.stats)))?;
    if let Some(busy) = &report.busy_users {
        emit(dir, "busy_users", out, |p| write_rows(p, &busy.top))?;
        emit(dir, "user_shares", out, |p| write_rows(p, &busy.shares))?;
    }
    emit(dir, "monthly_timeline", out, |p| write_rows(p, &report.monthly_timeline))?;
    emit(dir, "daily_timeline", out, |p| write_rows(p, &report.daily_timeline))?;
    emit(dir, "week_activity", out, |p| write_rows(p, &report.week_activity))?;
    emit(dir, "month_activity", out, |p| write_rows(p, &report.month_activity))?;
    emit(dir, "heatmap", out, |p| write_heatmap(p, &report.heatmap))?;
    emit(dir, "common_words", out, |p| write_rows(p, &report.common_words))?;
    emit(dir, "emojis", out, |p| write_rows(p, &report.emojis))?;
    emit(dir, "insights", out, |p| write_rows(p, std::slice::from_ref(&report.insights)))?;

    tracing::debug!(dir = %dir.display(), files = written.len(), "wrote CSV tables");
    Ok(written)
}

fn emit(
    dir: &Path,
    name: &str,
    written: &mut Vec<PathBuf>,
    write: impl FnOnce(&Path) -> Result<()>,
) -> Result<()> {
    let path = dir.join(format!("{name}.csv"));
    write(&path)?;
    written.push(path);
    Ok(())
}

fn writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path)?;
    Ok(csv::WriterBuilder::new().delimiter(b';').from_writer(file))
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = writer(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pivot layout: a `day` column followed by one column per period.
fn write_heatmap(path: &Path, heatmap: &Heatmap) -> Result<()> {
    let mut writer = writer(path)?;

    let mut header = vec!["day"];
    header.extend(heatmap.columns.iter().copied());
    writer.write_record(&header)?;

    for (day, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
        let mut record = vec![(*day).to_string()];
        record.extend(cells.iter().map(ToString::to_string));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
