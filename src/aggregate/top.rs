//! A bounded ranking of the largest values in a stream.
//!
//! The capacity is expected to be small (a handful of entries), so the ranking is kept as a plain
//! sorted [Vec] and maintained by insertion sort rather than with a heap.

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

use crate::aggregate::Aggregator;
use crate::Item;

/// A value that made it into a [TopN] ranking, along with the label it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    value: i64,
    label: String,
}

impl Ranked {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Ranked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

/// Keeps the `capacity` largest values seen so far, sorted by value descending.
///
/// Only a strictly greater value displaces an existing entry, so among equal values the one that
/// arrived first ranks higher and is the last to be dropped.
///
/// ## Example
/// ```rust
/// use std::num::NonZeroUsize;
/// use daytally::aggregate::{Aggregator, TopN};
///
/// let mut top: TopN<(&str, i64)> = TopN::new(NonZeroUsize::new(3).unwrap());
///
/// for item in [("1st", 10), ("2nd", 20), ("3rd", 30), ("4th", 25)] {
///     top.update(item);
/// }
///
/// let ranking: Vec<_> = top.iter().map(|r| (r.value(), r.label())).collect();
///
/// assert_eq!(ranking, vec![(30, "3rd"), (25, "4th"), (20, "2nd")]);
/// ```
#[derive(Debug, Clone)]
pub struct TopN<I> {
    capacity: NonZeroUsize,
    leaders: Vec<Ranked>,
    _phantom_data: PhantomData<I>,
}

impl<I> Aggregator for TopN<I>
where
    I: Item,
{
    type Item = I;

    fn update(&mut self, item: I) {
        self.insert(item.value(), item.label());
    }

    fn reset(&mut self) {
        self.leaders.clear();
    }
}

impl<I> TopN<I>
where
    I: Item,
{
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            leaders: Vec::with_capacity(capacity.get() + 1),
            _phantom_data: Default::default(),
        }
    }

    /// Inserts the contender before the first entry it strictly beats, then trims the ranking back
    /// to capacity. Returns the rank the contender landed at, or [None] when it was discarded.
    pub fn insert(&mut self, value: i64, label: &str) -> Option<usize> {
        let capacity = self.capacity.get();

        match self.leaders.iter().position(|leader| value > leader.value) {
            Some(index) => {
                self.leaders.insert(index, Ranked::new(value, label));
                self.leaders.truncate(capacity);

                Some(index)
            }
            None if self.leaders.len() < capacity => {
                self.leaders.push(Ranked::new(value, label));

                Some(self.leaders.len() - 1)
            }
            None => None,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.leaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ranked> {
        self.leaders.iter()
    }

    pub fn as_slice(&self) -> &[Ranked] {
        &self.leaders
    }
}
