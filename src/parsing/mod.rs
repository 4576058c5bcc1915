//! Low-level transcript parsing.
//!
//! - [`timestamp`] - finds message markers and turns them into timestamps
//! - [`segment`] - splits a transcript into message blocks and classifies them
//!
//! [`WhatsAppParser`](crate::parsers::WhatsAppParser) wires both together.

pub mod segment;
pub mod timestamp;

pub use segment::{Segment, classify, segment};
pub use timestamp::{
    FormatStrategy, PermissiveStrategy, TimestampRecognizer, TimestampStrategy, find_markers,
};
