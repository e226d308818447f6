use std::fmt;
use std::mem;

use tracing::debug;

use crate::report::GroupSink;
use crate::{Event, Item, LabeledValue, ReportError};

/// The sum of a maximal run of consecutive events sharing the same date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    date: String,
    sum: i128,
}

impl DateGroup {
    pub fn new(date: impl Into<String>, sum: i128) -> Self {
        Self {
            date: date.into(),
            sum,
        }
    }

    fn open<I>(item: &I) -> Self
    where
        I: Item,
    {
        Self::new(item.key(), i128::from(item.value()))
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn sum(&self) -> i128 {
        self.sum
    }
}

impl fmt::Display for DateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.sum)
    }
}

#[derive(Debug, Default)]
enum GroupState {
    #[default]
    Empty,
    Open(DateGroup),
    Finalized,
}

/// Sums consecutive events by date, handing every group to a [GroupSink] the moment the next date
/// (or the end of the stream) shows up.
///
/// Only the currently open group is held in memory. Events for the same date are expected to be
/// contiguous; a date that reappears later in the stream starts a new group.
///
/// Closing groups writes to the sink, which may fail, so unlike the other reducers this one does
/// not implement [Aggregator](crate::aggregate::Aggregator).
///
/// ## Example
/// ```rust
/// use daytally::aggregate::{DateGroup, DateGrouping};
/// use daytally::{Event, LabeledValue};
///
/// let mut grouping = DateGrouping::new();
/// let mut groups: Vec<DateGroup> = Vec::new();
///
/// for (label, value) in [
///     ("2016-12-01T07:30:00", 1),
///     ("2016-12-01T08:00:00", 1),
///     ("2016-12-02T00:00:00", 200),
/// ] {
///     let event = Event::Value(LabeledValue::new(label, value));
///     grouping.update(event, &mut groups).unwrap();
/// }
///
/// assert_eq!(groups, vec![DateGroup::new("2016-12-01", 2)]);
///
/// grouping.update(Event::<LabeledValue>::EndOfStream, &mut groups).unwrap();
///
/// assert_eq!(groups.last(), Some(&DateGroup::new("2016-12-02", 200)));
/// assert!(grouping.is_finalized());
/// ```
#[derive(Debug, Default)]
pub struct DateGrouping {
    state: GroupState,
    closed: u64,
}

impl DateGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event. The first event, real or not, opens the sink's section. The end of stream
    /// flushes the open group and finalizes the grouping; any event after that is rejected.
    ///
    /// If the sink fails to take a closed group, the group stays open and the event is dropped.
    pub fn update<I, S>(&mut self, event: Event<I>, sink: &mut S) -> Result<(), ReportError>
    where
        I: Item,
        S: GroupSink + ?Sized,
    {
        self.state = match mem::take(&mut self.state) {
            GroupState::Empty => {
                sink.open()?;

                match event {
                    Event::Value(item) => GroupState::Open(DateGroup::open(&item)),
                    Event::EndOfStream => GroupState::Finalized,
                }
            }
            GroupState::Open(mut group) => {
                if let Event::Value(item) = &event {
                    if group.date == item.key() {
                        group.sum += i128::from(item.value());
                        self.state = GroupState::Open(group);
                        return Ok(());
                    }
                }

                if let Err(err) = self.close(&group, sink) {
                    self.state = GroupState::Open(group);
                    return Err(err);
                }

                match event {
                    Event::Value(item) => GroupState::Open(DateGroup::open(&item)),
                    Event::EndOfStream => GroupState::Finalized,
                }
            }
            GroupState::Finalized => {
                self.state = GroupState::Finalized;
                return Err(ReportError::Finalized);
            }
        };

        Ok(())
    }

    /// Feeds the end of the stream.
    pub fn end<S>(&mut self, sink: &mut S) -> Result<(), ReportError>
    where
        S: GroupSink + ?Sized,
    {
        self.update(Event::<&LabeledValue>::EndOfStream, sink)
    }

    fn close<S>(&mut self, group: &DateGroup, sink: &mut S) -> Result<(), ReportError>
    where
        S: GroupSink + ?Sized,
    {
        sink.close(group)?;
        self.closed += 1;
        debug!(date = %group.date, sum = group.sum, "Closed date group");
        Ok(())
    }

    /// The group still accumulating, if any.
    pub fn open_group(&self) -> Option<&DateGroup> {
        match &self.state {
            GroupState::Open(group) => Some(group),
            _ => None,
        }
    }

    /// How many groups have been handed to the sink.
    pub fn closed(&self) -> u64 {
        self.closed
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, GroupState::Finalized)
    }

    pub fn reset(&mut self) {
        self.state = GroupState::Empty;
        self.closed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    #[derive(Default)]
    struct Recorder {
        opened: usize,
        groups: Vec<DateGroup>,
        broken: bool,
    }

    impl GroupSink for Recorder {
        fn open(&mut self) -> Result<(), ReportError> {
            self.opened += 1;
            Ok(())
        }

        fn close(&mut self, group: &DateGroup) -> Result<(), ReportError> {
            if self.broken {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe).into());
            }

            self.groups.push(group.clone());
            Ok(())
        }
    }

    fn feed(
        grouping: &mut DateGrouping,
        stream: &[(&'static str, i64)],
        sink: &mut Recorder,
    ) {
        for item in stream {
            grouping.update(Event::Value(*item), sink).unwrap();
        }
    }

    #[test]
    fn single_day() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(
            &mut grouping,
            &[("2016-12-01T07:30:00", 46), ("2016-12-01T08:00:00", 42)],
            &mut sink,
        );

        assert_eq!(sink.opened, 1);
        assert!(sink.groups.is_empty());
        assert_eq!(grouping.open_group(), Some(&DateGroup::new("2016-12-01", 88)));

        grouping.end(&mut sink).unwrap();

        assert_eq!(sink.opened, 1);
        assert_eq!(sink.groups, vec![DateGroup::new("2016-12-01", 88)]);
        assert_eq!(grouping.open_group(), None);
        assert!(grouping.is_finalized());
    }

    #[test]
    fn multiple_days() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(
            &mut grouping,
            &[("2016-12-01T07:30:00", 1), ("2016-12-01T08:00:00", 1)],
            &mut sink,
        );
        feed(&mut grouping, &[("2016-12-02T00:00:00", 200)], &mut sink);

        assert_eq!(sink.groups, vec![DateGroup::new("2016-12-01", 2)]);

        feed(&mut grouping, &[("2016-12-03T00:00:00", 300)], &mut sink);

        assert_eq!(sink.groups.last(), Some(&DateGroup::new("2016-12-02", 200)));

        grouping.end(&mut sink).unwrap();

        assert_eq!(
            sink.groups,
            vec![
                DateGroup::new("2016-12-01", 2),
                DateGroup::new("2016-12-02", 200),
                DateGroup::new("2016-12-03", 300),
            ]
        );
        assert_eq!(grouping.closed(), 3);
    }

    #[test]
    fn unsorted_dates_are_not_merged() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(
            &mut grouping,
            &[
                ("2016-12-01T07:30:00", 1),
                ("2016-12-02T07:30:00", 2),
                ("2016-12-01T08:00:00", 3),
            ],
            &mut sink,
        );
        grouping.end(&mut sink).unwrap();

        assert_eq!(
            sink.groups,
            vec![
                DateGroup::new("2016-12-01", 1),
                DateGroup::new("2016-12-02", 2),
                DateGroup::new("2016-12-01", 3),
            ]
        );
    }

    #[test]
    fn empty_stream() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        grouping.end(&mut sink).unwrap();

        assert_eq!(sink.opened, 1);
        assert!(sink.groups.is_empty());
        assert!(grouping.is_finalized());
    }

    #[test]
    fn rejects_events_after_end_of_stream() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(&mut grouping, &[("2016-12-01T07:30:00", 1)], &mut sink);
        grouping
            .update(Event::<(&str, i64)>::EndOfStream, &mut sink)
            .unwrap();

        let result = grouping.update(Event::Value(("2016-12-02T07:30:00", 1_i64)), &mut sink);

        assert!(matches!(result, Err(ReportError::Finalized)));
        assert!(matches!(
            grouping.end(&mut sink),
            Err(ReportError::Finalized)
        ));
        assert_eq!(sink.groups, vec![DateGroup::new("2016-12-01", 1)]);
    }

    #[test]
    fn failed_close_keeps_group_open() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(
            &mut grouping,
            &[("2016-12-01T07:30:00", 46), ("2016-12-01T08:00:00", 42)],
            &mut sink,
        );

        sink.broken = true;

        let result = grouping.update(Event::Value(("2016-12-02T07:30:00", 1_i64)), &mut sink);

        assert!(matches!(result, Err(ReportError::Io(_))));
        assert!(matches!(grouping.end(&mut sink), Err(ReportError::Io(_))));
        assert_eq!(grouping.open_group(), Some(&DateGroup::new("2016-12-01", 88)));
        assert_eq!(grouping.closed(), 0);
        assert!(!grouping.is_finalized());

        sink.broken = false;
        grouping.end(&mut sink).unwrap();

        assert_eq!(sink.opened, 1);
        assert_eq!(sink.groups, vec![DateGroup::new("2016-12-01", 88)]);
        assert_eq!(grouping.closed(), 1);
        assert!(grouping.is_finalized());
    }

    #[test]
    fn sum_past_i64_bounds() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(
            &mut grouping,
            &[
                ("2016-12-01T07:30:00", i64::MAX),
                ("2016-12-01T08:00:00", i64::MAX),
                ("2016-12-01T08:30:00", 2),
            ],
            &mut sink,
        );
        grouping.end(&mut sink).unwrap();

        assert_eq!(
            sink.groups,
            vec![DateGroup::new("2016-12-01", 2 * i128::from(i64::MAX) + 2)]
        );
    }

    #[test]
    fn reset() {
        let mut grouping = DateGrouping::new();
        let mut sink = Recorder::default();

        feed(&mut grouping, &[("2016-12-01T07:30:00", 1)], &mut sink);
        grouping.end(&mut sink).unwrap();
        grouping.reset();

        feed(&mut grouping, &[("2016-12-05T07:30:00", 4)], &mut sink);
        grouping.end(&mut sink).unwrap();

        assert_eq!(sink.opened, 2);
        assert_eq!(
            sink.groups,
            vec![
                DateGroup::new("2016-12-01", 1),
                DateGroup::new("2016-12-05", 4),
            ]
        );
    }

    #[test]
    fn split_on_date_boundary_matches_single_pass() {
        let stream = [
            ("2016-12-01T07:30:00", 5),
            ("2016-12-01T08:00:00", 6),
            ("2016-12-02T07:30:00", 7),
            ("2016-12-03T07:30:00", 8),
            ("2016-12-03T09:30:00", 9),
        ];

        let mut whole = Recorder::default();
        let mut grouping = DateGrouping::new();
        feed(&mut grouping, &stream, &mut whole);
        grouping.end(&mut whole).unwrap();

        let mut split = Recorder::default();
        let (head, tail) = stream.split_at(2);
        for part in [head, tail] {
            grouping.reset();
            feed(&mut grouping, part, &mut split);
            grouping.end(&mut split).unwrap();
        }

        assert_eq!(split.groups, whole.groups);
    }
}
