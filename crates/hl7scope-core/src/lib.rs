//! hl7scope core - domain types for the live HL7 console
//!
//! This crate contains the client-side data model and the pure display
//! transforms over it. It has no I/O and no UI concerns.
//!
//! - `message` - message summaries, full details, segments and fields
//! - `stats` - aggregate counters reported by the collector
//! - `formatting` - timestamp display and untrusted-text sanitization

pub mod formatting;
pub mod message;
pub mod stats;

pub use formatting::{format_received_at, is_use_utc, sanitize, set_use_utc};
pub use message::{split_raw_lines, Field, MessageDetail, MessageSummary, Segment};
pub use stats::CollectorStats;
