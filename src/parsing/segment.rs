//! Message segmentation.
//!
//! Splits a transcript into one block per timestamp marker and classifies each
//! block as an authored message (`Name: text`) or a group notification.

use std::sync::LazyLock;

use regex::Regex;

use super::timestamp::find_markers;
use crate::record::Body;

/// Shortest non-empty first-line prefix followed by `:` and whitespace.
static AUTHOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\n]+?):\s").expect("author pattern is valid"));

/// A raw message block together with the marker that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The timestamp marker, trailing dash and space included.
    pub marker: &'a str,
    /// Everything after the marker up to the next marker, trailing line
    /// breaks removed.
    pub block: &'a str,
}

/// Splits `text` into message blocks.
///
/// Text before the first marker (export headers and the like) is dropped.
///
/// ```
/// use chatlens::parsing::segment::segment;
///
/// let text = "header\n1/1/23, 10:00 PM - Alice: Hi\n1/1/23, 10:06 PM - Group created";
/// let segments = segment(text);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].block, "Alice: Hi");
/// assert_eq!(segments[1].block, "Group created");
/// ```
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let markers = find_markers(text);

    if let Some(first) = markers.first() {
        let preamble = &text[..first.start];
        if !preamble.trim().is_empty() {
            tracing::debug!(bytes = preamble.len(), "dropping text before first message");
        }
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            Segment {
                marker: &text[range.clone()],
                block: text[range.end..end].trim_end_matches(['\n', '\r']),
            }
        })
        .collect()
}

/// Classifies a block as authored message or notification.
///
/// Never fails: a block without a `Name: ` prefix, including an empty one,
/// becomes a notification.
///
/// ```
/// use chatlens::parsing::segment::classify;
/// use chatlens::record::Body;
///
/// assert_eq!(classify("Alice: Hello"), Body::authored("Alice", "Hello"));
/// assert_eq!(classify("Bob left"), Body::notification("Bob left"));
/// ```
pub fn classify(block: &str) -> Body {
    match AUTHOR_PREFIX.captures(block) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let user = caps.get(1).map_or("", |m| m.as_str());
            Body::authored(user, &block[whole..])
        }
        None => Body::notification(block),
    }
}
