//! Record construction.
//!
//! Pairs parsed timestamps with classified message bodies, position by
//! position, and derives each record's time fields.

use chrono::NaiveDateTime;

use super::corpus::Corpus;
use crate::error::{ChatlensError, Result};
use crate::record::{Body, Record};

/// Builds a corpus from parallel timestamp and body sequences.
///
/// # Errors
///
/// Returns [`ChatlensError::SegmentMismatch`] if the sequences differ in
/// length. That only happens when the recognizer and segmenter disagree, so
/// nothing is built rather than risk misaligned records.
///
/// ```
/// use chatlens::core::builder::build_corpus;
/// use chatlens::record::Body;
///
/// let corpus = build_corpus(vec![None], vec![Body::notification("hi")])?;
/// assert_eq!(corpus.len(), 1);
///
/// assert!(build_corpus(vec![None, None], vec![Body::notification("hi")]).is_err());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub fn build_corpus(timestamps: Vec<Option<NaiveDateTime>>, bodies: Vec<Body>) -> Result<Corpus> {
    if timestamps.len() != bodies.len() {
        tracing::error!(
            timestamps = timestamps.len(),
            segments = bodies.len(),
            "timestamp/segment count mismatch"
        );
        return Err(ChatlensError::segment_mismatch(timestamps.len(), bodies.len()));
    }

    let records = timestamps
        .into_iter()
        .zip(bodies)
        .map(|(ts, body)| Record::new(ts, body))
        .collect();

    Ok(Corpus::from_records(records))
}
