//! Single-pass statistics over an ordered stream of timestamped integer measurements.
//!
//! Every event flows once, in stream order, through a fixed set of reducers:
//! - [aggregate::DateGrouping] sums consecutive events sharing a date and emits each sum as soon
//!   as the date changes.
//! - [aggregate::Total] keeps the running total of all values.
//! - [aggregate::TopN] keeps the N largest values seen so far.
//! - [aggregate::MinWindow] tracks the K consecutive events with the smallest sum.
//!
//! Memory is bounded by N and K, never by the length of the stream.
//!
//! ## Example
//! ```rust
//! use daytally::aggregate::DateGroup;
//! use daytally::{LabeledValue, ReportConfig, TrafficReport};
//!
//! let mut report = TrafficReport::new(ReportConfig::default());
//! let mut groups: Vec<DateGroup> = Vec::new();
//!
//! report.feed(LabeledValue::new("2016-12-01T07:30:00", 46), &mut groups).unwrap();
//! report.feed(LabeledValue::new("2016-12-01T08:00:00", 42), &mut groups).unwrap();
//!
//! let summary = report.finish(&mut groups).unwrap();
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].date(), "2016-12-01");
//! assert_eq!(groups[0].sum(), 88);
//! assert_eq!(summary.total(), 88);
//! ```

use std::fmt;

pub use config::ReportConfig;
pub use error::{ParseError, ReportError};
pub use item::Item;
pub use report::{GroupSink, Summary, TextReport, TrafficReport};

pub mod aggregate;
pub mod config;
pub mod error;
pub mod item;
pub mod parse;
pub mod report;

/// A single measurement: an ISO-8601 timestamp label paired with an integer value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledValue {
    label: String,
    value: i64,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl fmt::Display for LabeledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

/// An element of the stream as seen by the date grouping: either a real measurement or the
/// end-of-stream marker that flushes the last open group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event<I> {
    Value(I),
    EndOfStream,
}
