pub use group::{DateGroup, DateGrouping};
pub use top::{Ranked, TopN};
pub use total::Total;
pub use window::{MinWindow, WindowRecord};

mod group;
mod top;
mod total;
mod window;

/// A single-pass computation over a stream of items.
pub trait Aggregator {
    type Item;

    fn update(&mut self, item: Self::Item);

    /// Forgets everything seen so far.
    fn reset(&mut self);
}
