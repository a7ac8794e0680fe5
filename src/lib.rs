#![no_std]

//! `TrackedVec`: a double-ended vector with cursors that detect stale use.
//!
//! `TrackedVec<T>` stores its elements in a single block with free slots on
//! both sides of the live range, so `push_back` and `push_front` are both
//! amortized O(1). When one end runs out of room the block is doubled and the
//! live elements are re-centered in the new block.
//!
//! Alongside borrow-checked iteration (`iter()`, `iter_mut()`, `into_iter()`),
//! the vector hands out detached cursors that stay usable across mutations.
//! A cursor records the vector's version and reallocation counters, and every
//! cursor operation checks them first. A stale cursor yields
//! [`TrackedVecError::InvalidCursor`] with a [`Severity`] instead of reading
//! memory that was moved or freed.
//!
//! The crate is `no_std` and needs only `alloc`.
//!
//! # Performance Characteristics
//!
//! - `push_back()`, `push_front()`, `emplace_back()`: amortized O(1); O(n) on a growth step
//! - `pop_back()`, `pop_front()`: O(1), capacity is never reduced
//! - `get()`, indexing: O(1)
//! - cursor operations: O(1), one counter comparison per operand
//!
//! # Double-Ended Interface
//!
//! ```
//! use trackvec::{tracked_vec, TrackedVec};
//!
//! let mut vec = tracked_vec![2, 3];
//! vec.push_front(1);
//! vec.push_back(4);
//! assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
//!
//! assert_eq!(vec.pop_front(), Some(1));
//! assert_eq!(vec.pop_back(), Some(4));
//! assert_eq!(vec.len(), 2);
//!
//! let mut empty: TrackedVec<u8> = TrackedVec::new();
//! assert!(empty.try_pop_back().is_err());
//! ```
//!
//! # Cursor Invalidation
//!
//! ```
//! use trackvec::{tracked_vec, Severity};
//!
//! let mut vec = tracked_vec![10, 20, 30];
//! let mut cursor = vec.begin();
//! cursor.inc(&vec).unwrap();
//! assert_eq!(cursor.get(&vec), Ok(&20));
//!
//! // The literal was built with an exact-size block, so this push reallocates.
//! vec.push_back(40);
//! let err = cursor.get(&vec).unwrap_err();
//! assert_eq!(err.severity(), Some(Severity::Moderate));
//!
//! // Accept the new state explicitly and carry on.
//! cursor.revalidate(&vec).unwrap();
//! *cursor.get_mut(&mut vec).unwrap() += 1;
//! assert_eq!(vec[1], 21);
//! ```
//!
//! # Range Construction
//!
//! ```
//! use trackvec::{RangeKind, TrackedVec};
//!
//! let exact = TrackedVec::from_range(0..5);
//! assert_eq!(exact.capacity(), 5);
//!
//! let evens = (0..10).filter(|n| n % 2 == 0);
//! assert_eq!(RangeKind::of(&evens), RangeKind::InputOnly);
//! let grown: TrackedVec<i32> = evens.collect();
//! assert_eq!(grown.as_slice(), &[0, 2, 4, 6, 8]);
//! ```

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod core;
mod cursor;
mod error;
mod iter;
mod range;
mod raw;

pub use crate::core::{TrackedVec, VecId, DEFAULT_CAPACITY};
pub use cursor::{ConstCursor, Cursor};
pub use error::{Invalidation, Severity, TrackedVecError};
pub use iter::{IntoIter, Iter, IterMut};
pub use range::RangeKind;

/// Builds a [`TrackedVec`] from a list of elements, like `vec!`.
///
/// ```
/// let vec = trackvec::tracked_vec!["a", "b", "c"];
/// assert_eq!(vec[2], "c");
/// assert_eq!(vec.capacity(), 3);
/// ```
#[macro_export]
macro_rules! tracked_vec {
    () => {
        $crate::TrackedVec::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::TrackedVec::from([$($item),+])
    };
}
