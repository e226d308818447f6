//! Threads every event through all the reducers and renders the results.

use std::io::Write;
use std::num::NonZeroUsize;

use tracing::{debug, info};

use crate::aggregate::{
    Aggregator, DateGroup, DateGrouping, MinWindow, Ranked, TopN, Total, WindowRecord,
};
use crate::{Event, Item, LabeledValue, ReportConfig, ReportError};

/// Receives date groups as soon as they close.
pub trait GroupSink {
    /// Called once, before the first group of a stream.
    fn open(&mut self) -> Result<(), ReportError>;

    fn close(&mut self, group: &DateGroup) -> Result<(), ReportError>;
}

impl GroupSink for Vec<DateGroup> {
    fn open(&mut self) -> Result<(), ReportError> {
        Ok(())
    }

    fn close(&mut self, group: &DateGroup) -> Result<(), ReportError> {
        self.push(group.clone());
        Ok(())
    }
}

/// The final, read-only state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    top_size: NonZeroUsize,
    window_size: NonZeroUsize,
    events: u64,
    total: i128,
    top: Vec<Ranked>,
    window: Option<WindowRecord>,
}

impl Summary {
    /// Number of events in the stream, not counting the end-of-stream marker.
    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn total(&self) -> i128 {
        self.total
    }

    /// The largest values, highest first.
    pub fn top(&self) -> &[Ranked] {
        &self.top
    }

    pub fn top_size(&self) -> NonZeroUsize {
        self.top_size
    }

    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    /// The least-sum window, or [None] for an empty stream.
    pub fn window(&self) -> Option<&WindowRecord> {
        self.window.as_ref()
    }
}

/// The aggregate state of one pass over a stream.
///
/// Each event goes through the date grouping, the running total, the ranking and the window, in
/// that order, before the next one is read. [TrafficReport::finish] sends the end-of-stream marker
/// through the date grouping only, then hands back the [Summary]. Once the grouping is finalized,
/// further events are rejected until [TrafficReport::reset].
#[derive(Debug)]
pub struct TrafficReport {
    config: ReportConfig,
    grouping: DateGrouping,
    total: Total<LabeledValue>,
    top: TopN<LabeledValue>,
    window: MinWindow<LabeledValue>,
}

impl TrafficReport {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            grouping: DateGrouping::new(),
            total: Total::new(),
            top: TopN::new(config.top),
            window: MinWindow::new(config.window),
        }
    }

    pub fn feed<S>(&mut self, value: LabeledValue, sink: &mut S) -> Result<(), ReportError>
    where
        S: GroupSink + ?Sized,
    {
        self.grouping.update(Event::Value(&value), sink)?;
        self.total.add(value.value());
        self.top.insert(value.value(), value.label());
        self.window.push(value.label(), value.value());

        Ok(())
    }

    /// Flushes the last date group and returns the final state.
    pub fn finish<S>(&mut self, sink: &mut S) -> Result<Summary, ReportError>
    where
        S: GroupSink + ?Sized,
    {
        self.grouping.end(sink)?;

        let summary = self.summary();

        info!(
            events = summary.events,
            groups = self.grouping.closed(),
            total = summary.total,
            "Finished report"
        );

        Ok(summary)
    }

    /// Feeds every record, then finishes. The first error aborts the run.
    pub fn run<R, S>(&mut self, records: R, sink: &mut S) -> Result<Summary, ReportError>
    where
        R: IntoIterator<Item = Result<LabeledValue, ReportError>>,
        S: GroupSink + ?Sized,
    {
        for record in records {
            self.feed(record?, sink)?;
        }

        self.finish(sink)
    }

    fn summary(&self) -> Summary {
        Summary {
            top_size: self.config.top,
            window_size: self.config.window,
            events: self.total.count(),
            total: self.total.sum(),
            top: self.top.as_slice().to_vec(),
            window: self.window.least().cloned(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.grouping.is_finalized()
    }

    /// Starts over for an independent stream.
    pub fn reset(&mut self) {
        debug!("Resetting report state");

        self.grouping.reset();
        self.total.reset();
        self.top.reset();
        self.window.reset();
    }
}

/// Renders the report as plain text: date groups as they close, then the summary.
#[derive(Debug)]
pub struct TextReport<W> {
    writer: W,
}

impl<W> TextReport<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn summary(&mut self, summary: &Summary) -> Result<(), ReportError> {
        writeln!(self.writer, "## Total = {}", summary.total())?;

        writeln!(self.writer, "## Top {}", summary.top_size())?;
        for ranked in summary.top() {
            writeln!(self.writer, "{ranked}")?;
        }

        match summary.window() {
            Some(window) => writeln!(
                self.writer,
                "## Least window of {} = {} [{} .. {}]",
                summary.window_size(),
                window.sum(),
                window.start(),
                window.end()
            )?,
            None => writeln!(
                self.writer,
                "## Least window of {} = none",
                summary.window_size()
            )?,
        }

        self.writer.flush()?;

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> GroupSink for TextReport<W>
where
    W: Write,
{
    fn open(&mut self) -> Result<(), ReportError> {
        writeln!(self.writer, "## Sum of values grouped by date")?;
        Ok(())
    }

    fn close(&mut self, group: &DateGroup) -> Result<(), ReportError> {
        writeln!(self.writer, "{group}")?;
        Ok(())
    }
}
