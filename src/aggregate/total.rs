use std::marker::PhantomData;

use crate::aggregate::Aggregator;
use crate::Item;

/// Running total and count of every value in the stream.
///
/// Values are `i64` but the sum is kept as `i128`, which cannot overflow before the `u64` count
/// does.
#[derive(Debug, Copy, Clone)]
pub struct Total<I> {
    sum: i128,
    count: u64,
    _phantom_data: PhantomData<I>,
}

impl<I> Default for Total<I> {
    fn default() -> Self {
        Self {
            sum: 0,
            count: 0,
            _phantom_data: Default::default(),
        }
    }
}

impl<I> Aggregator for Total<I>
where
    I: Item,
{
    type Item = I;

    fn update(&mut self, item: I) {
        self.add(item.value());
    }

    fn reset(&mut self) {
        self.sum = 0;
        self.count = 0;
    }
}

impl<I> Total<I>
where
    I: Item,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: i64) {
        self.sum += i128::from(value);
        self.count += 1;
    }

    pub fn sum(&self) -> i128 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
