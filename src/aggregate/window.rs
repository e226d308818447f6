use std::collections::VecDeque;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::aggregate::Aggregator;
use crate::{Item, LabeledValue};

/// The smallest window sum observed so far, with the labels of the first and last event of that
/// window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    sum: i128,
    start: String,
    end: String,
}

impl WindowRecord {
    pub fn new(sum: i128, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            sum,
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn sum(&self) -> i128 {
        self.sum
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Finds the run of `size` consecutive events whose values add up to the least.
///
/// The window is a FIFO of the most recent events; sliding it subtracts the evicted value and adds
/// the new one, so each update is O(1). Until the window first fills up there is only one candidate,
/// the events seen so far, and the record simply tracks it. Afterwards the record only changes when
/// a strictly smaller sum shows up, so among equal sums the earliest window wins. Sums are `i128`,
/// so any window of `i64` values fits.
///
/// ## Example
/// ```rust
/// use std::num::NonZeroUsize;
/// use daytally::aggregate::{Aggregator, MinWindow};
///
/// let mut window: MinWindow<(&str, i64)> = MinWindow::new(NonZeroUsize::new(3).unwrap());
///
/// for item in [("1st", 40), ("2nd", 42), ("3rd", 35), ("4th", 0), ("5th", 1000)] {
///     window.update(item);
/// }
///
/// let least = window.least().unwrap();
///
/// assert_eq!(least.sum(), 77);
/// assert_eq!((least.start(), least.end()), ("2nd", "4th"));
/// ```
#[derive(Debug, Clone)]
pub struct MinWindow<I> {
    size: NonZeroUsize,
    buffer: VecDeque<LabeledValue>,
    sum: i128,
    least: Option<WindowRecord>,
    _phantom_data: PhantomData<I>,
}

impl<I> Aggregator for MinWindow<I>
where
    I: Item,
{
    type Item = I;

    fn update(&mut self, item: I) {
        self.push(item.label(), item.value());
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0;
        self.least = None;
    }
}

impl<I> MinWindow<I>
where
    I: Item,
{
    pub fn new(size: NonZeroUsize) -> Self {
        Self {
            size,
            buffer: VecDeque::with_capacity(size.get()),
            sum: 0,
            least: None,
            _phantom_data: Default::default(),
        }
    }

    /// Slides the window over one more event.
    pub fn push(&mut self, label: &str, value: i64) {
        let event = LabeledValue::new(label, value);
        let value = i128::from(value);

        let Some(least) = self.least.as_mut() else {
            self.sum = value;
            self.least = Some(WindowRecord::new(value, label, label));
            self.buffer.push_back(event);
            return;
        };

        if self.buffer.len() < self.size.get() {
            self.sum += value;
            least.sum = self.sum;
            least.end.clone_from(&event.label);
            self.buffer.push_back(event);
            return;
        }

        if let Some(oldest) = self.buffer.pop_front() {
            self.sum -= i128::from(oldest.value);
        }
        self.sum += value;
        self.buffer.push_back(event);

        if self.sum < least.sum {
            if let (Some(first), Some(last)) = (self.buffer.front(), self.buffer.back()) {
                *least = WindowRecord::new(self.sum, first.label.as_str(), last.label.as_str());
                debug!(sum = self.sum, start = %least.start, end = %least.end, "New least window");
            }
        }
    }

    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// The sum of the events currently in the window.
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// The events currently in the window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = (&str, i64)> {
        self.buffer.iter().map(|event| (event.label.as_str(), event.value))
    }

    /// The least window seen so far, or [None] before the first event.
    pub fn least(&self) -> Option<&WindowRecord> {
        self.least.as_ref()
    }
}
