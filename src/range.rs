//! Building a `TrackedVec` from a range of values.
//!
//! A range whose length is known up front is copied into a block of exactly
//! that size with a single allocation. Any other range is appended one element
//! at a time through `push_back`, relying on the growth policy.

use alloc::vec::Vec;

use crate::core::TrackedVec;

/// What a source range can tell about its length before it is consumed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RangeKind {
    /// The range reports an exact element count.
    RandomAccess(usize),
    /// The count is unknown until the range is exhausted.
    InputOnly,
}

impl RangeKind {
    /// Classifies an iterator by its size hint.
    #[must_use]
    pub fn of<I: Iterator>(iter: &I) -> Self {
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => RangeKind::RandomAccess(lower),
            _ => RangeKind::InputOnly,
        }
    }
}

impl<T> TrackedVec<T> {
    /// Builds a vector from `items`, choosing the strategy by [`RangeKind`].
    pub fn from_range<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = items.into_iter();
        match RangeKind::of(&iter) {
            RangeKind::RandomAccess(count) => Self::from_sized(iter, count),
            RangeKind::InputOnly => Self::from_input(iter),
        }
    }

    /// Builds a vector from a range whose length is known, allocating once.
    pub fn from_exact<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = items.into_iter();
        let count = iter.len();
        Self::from_sized(iter, count)
    }

    fn from_sized<I>(mut iter: I, count: usize) -> Self
    where
        I: Iterator<Item = T>,
    {
        let mut vec = Self::with_layout(count, 0);
        for item in iter.by_ref().take(count) {
            // Safety: at most `count` elements are written into `count` slots
            unsafe { vec.construct_back_unchecked(item) };
        }
        // A range that under-reported its length still contributes everything
        for item in iter {
            vec.push_back(item);
        }
        vec.reset_counters();
        vec
    }

    fn from_input<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        let mut vec = Self::new();
        for item in iter {
            vec.push_back(item);
        }
        vec.reset_counters();
        vec
    }
}

impl<T> FromIterator<T> for TrackedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_range(iter)
    }
}

impl<T> Extend<T> for TrackedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for TrackedVec<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_exact(items)
    }
}

impl<T: Clone> From<&[T]> for TrackedVec<T> {
    fn from(items: &[T]) -> Self {
        Self::from_exact(items.iter().cloned())
    }
}

impl<T> From<Vec<T>> for TrackedVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_exact(items)
    }
}
