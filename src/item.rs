use crate::LabeledValue;

/// An item in a stream of inputs.
pub trait Item {
    /// The label of this item, expected to be an ISO-8601 datetime.
    fn label(&self) -> &str;

    /// The value associated with this item.
    fn value(&self) -> i64;

    /// The grouping key for this item: the date portion of the label, i.e. everything before the
    /// first `T`. A label without a `T` is its own key.
    fn key(&self) -> &str {
        let label = self.label();

        match label.split_once('T') {
            Some((date, _)) => date,
            None => label,
        }
    }
}

impl Item for LabeledValue {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> i64 {
        self.value
    }
}

impl Item for (&str, i64) {
    fn label(&self) -> &str {
        self.0
    }

    fn value(&self) -> i64 {
        self.1
    }
}

impl<I> Item for &I
where
    I: Item + ?Sized,
{
    fn label(&self) -> &str {
        (*self).label()
    }

    fn value(&self) -> i64 {
        (*self).value()
    }

    fn key(&self) -> &str {
        (*self).key()
    }
}
