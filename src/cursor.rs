//! Detached cursors over a `TrackedVec`.
//!
//! A cursor does not borrow its vector. It holds the vector's [`VecId`], a
//! logical index relative to the first element, and the `version` and
//! `reallocation_count` observed when it was created or last revalidated.
//! Every operation takes the vector as an argument and revalidates against
//! it before doing anything else, so a stale cursor produces a
//! [`TrackedVecError::InvalidCursor`] instead of touching the wrong element.
//!
//! # Severity
//!
//! When the captured version differs from the vector's current one:
//!
//! | condition                                         | severity   |
//! |---------------------------------------------------|------------|
//! | index outside `0..=len`                            | `Severe`   |
//! | in bounds, storage block replaced since capture    | `Moderate` |
//! | in bounds, same storage block                      | `Mild`     |
//!
//! A `Moderate` cursor still names an existing slot, but after a
//! reallocation caused by `push_front` that slot may hold a different
//! logical element than the one the cursor was created for.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use log::debug;

use crate::core::{TrackedVec, VecId};
use crate::error::{Invalidation, Severity, TrackedVecError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    owner: VecId,
    index: isize,
    version: u64,
    reallocations: u64,
    in_bounds: bool,
}

fn within(index: isize, len: usize) -> bool {
    usize::try_from(index).is_ok_and(|index| index <= len)
}

impl Position {
    fn capture<T>(vec: &TrackedVec<T>, index: isize) -> Self {
        Self {
            owner: vec.id(),
            index,
            version: vec.version(),
            reallocations: vec.reallocation_count(),
            in_bounds: within(index, vec.len()),
        }
    }

    fn check_invalid<T>(&self, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
        if self.owner != vec.id() {
            return Err(TrackedVecError::ForeignCursor);
        }
        if self.version == vec.version() {
            return Ok(());
        }

        let severity = if !within(self.index, vec.len()) {
            Severity::Severe
        } else if self.reallocations != vec.reallocation_count() {
            Severity::Moderate
        } else {
            Severity::Mild
        };
        debug!(
            "trackvec: {} stale cursor at index {} on {:?} (version {} -> {})",
            severity,
            self.index,
            self.owner,
            self.version,
            vec.version()
        );

        Err(TrackedVecError::InvalidCursor(Invalidation {
            severity,
            index: self.index,
            length: vec.len(),
            captured_version: self.version,
            current_version: vec.version(),
        }))
    }

    fn shifted<T>(&self, by: isize, vec: &TrackedVec<T>) -> Self {
        let index = self.index.saturating_add(by);
        Self {
            index,
            in_bounds: within(index, vec.len()),
            ..*self
        }
    }

    /// Slot offset of the element `by` positions away, if it is live.
    fn element<T>(&self, by: isize, vec: &TrackedVec<T>) -> Result<usize, TrackedVecError> {
        let index = self.index.saturating_add(by);
        match usize::try_from(index) {
            Ok(offset) if offset < vec.len() => Ok(offset),
            _ => Err(TrackedVecError::CursorOutOfRange {
                index,
                length: vec.len(),
            }),
        }
    }
}

/// A position within a `TrackedVec` that grants mutable access.
///
/// Obtained from [`TrackedVec::begin`] / [`TrackedVec::end`].
pub struct Cursor<T> {
    pos: Position,
    _marker: PhantomData<fn() -> T>,
}

/// A read-only position within a `TrackedVec`.
///
/// Obtained from [`TrackedVec::cbegin`] / [`TrackedVec::cend`], or converted
/// from a [`Cursor`].
pub struct ConstCursor<T> {
    pos: Position,
    _marker: PhantomData<fn() -> T>,
}

macro_rules! cursor_ops {
    ($name:ident) => {
        impl<T> $name<T> {
            pub(crate) fn new(vec: &TrackedVec<T>, index: isize) -> Self {
                Self::from_position(Position::capture(vec, index))
            }

            fn from_position(pos: Position) -> Self {
                Self {
                    pos,
                    _marker: PhantomData,
                }
            }

            /// Logical index relative to the first element at capture time.
            #[must_use]
            pub fn index(&self) -> isize {
                self.pos.index
            }

            /// Whether the index was within `0..=len` after the last move.
            #[must_use]
            pub fn is_in_bounds(&self) -> bool {
                self.pos.in_bounds
            }

            /// Compares the captured counters with the live ones.
            ///
            /// # Errors
            ///
            /// Returns `TrackedVecError::ForeignCursor` if `vec` did not create
            /// this cursor, or `TrackedVecError::InvalidCursor` carrying the
            /// severity if `vec` has changed since the cursor was captured.
            pub fn check_invalid(&self, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
                self.pos.check_invalid(vec)
            }

            /// Re-captures the live counters, keeping the index.
            ///
            /// This accepts whatever element now sits at the index.
            ///
            /// # Errors
            ///
            /// Returns `TrackedVecError::ForeignCursor` if `vec` did not create
            /// this cursor.
            pub fn revalidate(&mut self, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
                if self.pos.owner != vec.id() {
                    return Err(TrackedVecError::ForeignCursor);
                }
                self.pos = Position::capture(vec, self.pos.index);
                Ok(())
            }

            /// Dereferences the cursor (`*it`).
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale, or with
            /// `TrackedVecError::CursorOutOfRange` if it does not point at an
            /// element (for example the `end` cursor).
            pub fn get<'v>(&self, vec: &'v TrackedVec<T>) -> Result<&'v T, TrackedVecError> {
                self.at(0, vec)
            }

            /// Element `n` positions away (`it[n]`).
            ///
            /// # Errors
            ///
            /// Same as [`get`](Self::get).
            pub fn at<'v>(&self, n: isize, vec: &'v TrackedVec<T>) -> Result<&'v T, TrackedVecError> {
                self.check_invalid(vec)?;
                let offset = self.pos.element(n, vec)?;
                vec.try_get(offset)
            }

            /// Pre-increment (`++it`).
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale; the cursor is left unchanged.
            pub fn inc(&mut self, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
                self.offset_by(1, vec)
            }

            /// Pre-decrement (`--it`).
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale; the cursor is left unchanged.
            pub fn dec(&mut self, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
                self.offset_by(-1, vec)
            }

            /// Post-increment (`it++`): moves forward, returning the prior position.
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale; the cursor is left unchanged.
            pub fn post_inc(&mut self, vec: &TrackedVec<T>) -> Result<Self, TrackedVecError> {
                let before = *self;
                self.inc(vec)?;
                Ok(before)
            }

            /// Post-decrement (`it--`): moves back, returning the prior position.
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale; the cursor is left unchanged.
            pub fn post_dec(&mut self, vec: &TrackedVec<T>) -> Result<Self, TrackedVecError> {
                let before = *self;
                self.dec(vec)?;
                Ok(before)
            }

            /// A new cursor `k` positions away (`it + k`, or `it - k` with negative `k`).
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale.
            pub fn offset(&self, k: isize, vec: &TrackedVec<T>) -> Result<Self, TrackedVecError> {
                self.check_invalid(vec)?;
                Ok(Self::from_position(self.pos.shifted(k, vec)))
            }

            /// Moves the cursor `k` positions (`it += k`, `it -= k`).
            ///
            /// # Errors
            ///
            /// Fails if the cursor is stale; the cursor is left unchanged.
            pub fn offset_by(&mut self, k: isize, vec: &TrackedVec<T>) -> Result<(), TrackedVecError> {
                *self = self.offset(k, vec)?;
                Ok(())
            }

            /// Signed distance `self - other`.
            ///
            /// # Errors
            ///
            /// Fails if either cursor is stale.
            pub fn distance(&self, other: &Self, vec: &TrackedVec<T>) -> Result<isize, TrackedVecError> {
                self.check_invalid(vec)?;
                other.check_invalid(vec)?;
                Ok(self.pos.index.saturating_sub(other.pos.index))
            }

            /// Whether both cursors point at the same slot (`it1 == it2`).
            ///
            /// # Errors
            ///
            /// Fails if either cursor is stale.
            pub fn same_position(&self, other: &Self, vec: &TrackedVec<T>) -> Result<bool, TrackedVecError> {
                Ok(self.compare(other, vec)? == Ordering::Equal)
            }

            /// Orders two cursors by position (`<`, `<=`, `>`, `>=`).
            ///
            /// # Errors
            ///
            /// Fails if either cursor is stale.
            pub fn compare(&self, other: &Self, vec: &TrackedVec<T>) -> Result<Ordering, TrackedVecError> {
                self.check_invalid(vec)?;
                other.check_invalid(vec)?;
                Ok(self.pos.index.cmp(&other.pos.index))
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("owner", &self.pos.owner)
                    .field("index", &self.pos.index)
                    .field("version", &self.pos.version)
                    .field("reallocations", &self.pos.reallocations)
                    .field("in_bounds", &self.pos.in_bounds)
                    .finish()
            }
        }
    };
}

cursor_ops!(Cursor);
cursor_ops!(ConstCursor);

impl<T> Cursor<T> {
    /// Mutable dereference (`*it = value`).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut<'v>(&self, vec: &'v mut TrackedVec<T>) -> Result<&'v mut T, TrackedVecError> {
        self.at_mut(0, vec)
    }

    /// Mutable access to the element `n` positions away (`it[n] = value`).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn at_mut<'v>(&self, n: isize, vec: &'v mut TrackedVec<T>) -> Result<&'v mut T, TrackedVecError> {
        self.check_invalid(vec)?;
        let offset = self.pos.element(n, vec)?;
        vec.try_get_mut(offset)
    }
}

impl<T> From<Cursor<T>> for ConstCursor<T> {
    fn from(cursor: Cursor<T>) -> Self {
        Self::from_position(cursor.pos)
    }
}
