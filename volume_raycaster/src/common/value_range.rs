use crate::Intensity;

/// Minimum and maximum of sampled intensities.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: Intensity,
    /// Upper bound
    pub high: Intensity,
}

impl ValueRange {
    /// Constructs new range with one element, `val`.
    pub fn seed(val: Intensity) -> ValueRange {
        ValueRange {
            low: val,
            high: val,
        }
    }

    /// Constructs minimal range, where all samples from an iterator
    /// are inside the range.
    /// Returns `None` for empty iterator.
    pub fn from_samples<'a>(iter: impl IntoIterator<Item = &'a Intensity>) -> Option<ValueRange> {
        let mut iter = iter.into_iter();
        let mut range = ValueRange::seed(*iter.next()?);
        for &val in iter {
            range.extend(val);
        }
        Some(range)
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: Intensity) {
        self.high = self.high.max(val);
        self.low = self.low.min(val);
    }
}
