use core::fmt;
use core::mem;
use core::ops::{Index, IndexMut};
use core::sync::atomic::{AtomicUsize, Ordering};

use log::trace;

use crate::cursor::{ConstCursor, Cursor};
use crate::error::TrackedVecError;
use crate::iter::{Iter, IterMut};
use crate::raw::RawBuf;

/// Number of slots allocated by [`TrackedVec::new`].
pub const DEFAULT_CAPACITY: usize = 8;

/// Identity of a `TrackedVec`, used by cursors as a non-owning back-reference.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct VecId(usize);

impl VecId {
    fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

/// A double-ended vector whose cursors detect use after mutation.
///
/// Live elements occupy the slot range `head..head + len` inside a larger
/// block, leaving free slots on both sides so that pushes at either end are
/// amortized O(1).
///
/// Every structural mutation bumps [`version`](Self::version); every
/// replacement of the storage block also bumps
/// [`reallocation_count`](Self::reallocation_count). Cursors capture both and
/// compare them on each access.
///
/// The type is neither `Send` nor `Sync`.
pub struct TrackedVec<T> {
    buf: RawBuf<T>,
    head: usize,
    len: usize,
    version: u64,
    reallocations: u64,
    id: VecId,
}

impl<T> TrackedVec<T> {
    /// Creates an empty vector with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty vector with exactly `capacity` slots.
    ///
    /// A third of the slots are kept free in front of the first element.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_layout(capacity, capacity / 3)
    }

    pub(crate) fn with_layout(capacity: usize, head: usize) -> Self {
        debug_assert!(head <= capacity);
        Self {
            buf: RawBuf::allocate(capacity),
            head,
            len: 0,
            version: 0,
            reallocations: 0,
            id: VecId::next(),
        }
    }

    /// Creates a vector of `len` default-constructed elements, with no spare slots.
    #[must_use]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_layout(len, 0);
        while vec.len < len {
            // Safety: slot vec.len is past the live range and below capacity
            unsafe { vec.buf.construct_at(vec.len, T::default()) };
            vec.len += 1;
        }
        vec
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Self::len).
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Free slots in front of the first element.
    #[must_use]
    pub fn head_room(&self) -> usize {
        self.head
    }

    /// Free slots after the last element.
    #[must_use]
    pub fn tail_room(&self) -> usize {
        self.buf.capacity() - self.head - self.len
    }

    /// Counter bumped on every structural mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Counter bumped every time the storage block is replaced.
    #[must_use]
    pub fn reallocation_count(&self) -> u64 {
        self.reallocations
    }

    #[must_use]
    pub fn id(&self) -> VecId {
        self.id
    }

    pub(crate) fn reset_counters(&mut self) {
        self.version = 0;
        self.reallocations = 0;
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // Safety: index < len, so the slot is live
        Some(unsafe { self.buf.get(self.head + index) })
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        // Safety: index < len, so the slot is live
        Some(unsafe { self.buf.get_mut(self.head + index) })
    }

    /// Gets the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `TrackedVecError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<&T, TrackedVecError> {
        let length = self.len;
        self.get(index)
            .ok_or(TrackedVecError::IndexOutOfBounds { index, length })
    }

    /// Gets the element at `index` for modification.
    ///
    /// # Errors
    ///
    /// Returns `TrackedVecError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, TrackedVecError> {
        let length = self.len;
        self.get_mut(index)
            .ok_or(TrackedVecError::IndexOutOfBounds { index, length })
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // Safety: head..head + len is exactly the live range
        unsafe { self.buf.slice(self.head, self.len) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: head..head + len is exactly the live range
        unsafe { self.buf.slice_mut(self.head, self.len) }
    }

    /// Appends an element, growing the storage if the back is exhausted.
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Prepends an element, growing the storage if the front is exhausted.
    pub fn push_front(&mut self, value: T) {
        self.emplace_front(|| value);
    }

    /// Constructs an element at the back from `make`.
    ///
    /// Growth happens before `make` runs, so the new element is written
    /// directly into its final slot.
    pub fn emplace_back<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        if self.tail_room() == 0 {
            self.grow(End::Back);
        }
        let slot = self.head + self.len;
        // Safety: tail_room() > 0, so the slot after the live range is free
        unsafe { self.buf.construct_at(slot, make()) };
        self.len += 1;
        self.version += 1;
    }

    /// Constructs an element at the front from `make`.
    pub fn emplace_front<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        if self.head == 0 {
            self.grow(End::Front);
        }
        let slot = self.head - 1;
        // Safety: head > 0, so the slot before the live range is free
        unsafe { self.buf.construct_at(slot, make()) };
        self.head = slot;
        self.len += 1;
        self.version += 1;
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the vector is empty. Capacity is kept.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.version += 1;
        // Safety: the slot was the last live one and is now outside the live range
        Some(unsafe { self.buf.take_at(self.head + self.len) })
    }

    /// Removes and returns the first element.
    ///
    /// Returns `None` if the vector is empty. Capacity is kept.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.head;
        self.head += 1;
        self.len -= 1;
        self.version += 1;
        // Safety: the slot was the first live one and is now outside the live range
        Some(unsafe { self.buf.take_at(slot) })
    }

    /// Tries to remove and return the last element.
    ///
    /// # Errors
    ///
    /// Returns `TrackedVecError::EmptyVector` if the vector is empty.
    pub fn try_pop_back(&mut self) -> Result<T, TrackedVecError> {
        self.pop_back().ok_or(TrackedVecError::EmptyVector)
    }

    /// Tries to remove and return the first element.
    ///
    /// # Errors
    ///
    /// Returns `TrackedVecError::EmptyVector` if the vector is empty.
    pub fn try_pop_front(&mut self) -> Result<T, TrackedVecError> {
        self.pop_front().ok_or(TrackedVecError::EmptyVector)
    }

    /// Destroys all elements, keeping the storage block.
    pub fn clear(&mut self) {
        self.destroy_elements();
        self.head = self.buf.capacity() / 3;
        self.version += 1;
    }

    /// Moves the contents out into a new vector, leaving `self` empty and
    /// without storage.
    ///
    /// The returned vector starts with fresh counters. `self` has its counters
    /// bumped, so cursors taken from it report invalidation.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let taken = Self {
            buf: mem::replace(&mut self.buf, RawBuf::dangling()),
            head: self.head,
            len: self.len,
            version: 0,
            reallocations: 0,
            id: VecId::next(),
        };
        self.head = 0;
        self.len = 0;
        self.version += 1;
        self.reallocations += 1;
        taken
    }

    /// Replaces the contents of `self` with those of `source`, leaving
    /// `source` empty and without storage.
    ///
    /// The old elements of `self` are destroyed and its old block released
    /// before the new block is installed.
    pub fn move_from(&mut self, source: &mut Self) {
        self.destroy_elements();
        let taken = source.take();
        self.install(taken.into_parts());
    }

    fn destroy_elements(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // Safety: head..head + len was the live range; len is reset first so a
        // panicking destructor cannot lead to a double drop
        unsafe { self.buf.destroy_range(self.head, len) };
    }

    pub(crate) fn into_parts(self) -> (RawBuf<T>, usize, usize) {
        let mut this = mem::ManuallyDrop::new(self);
        let buf = mem::replace(&mut this.buf, RawBuf::dangling());
        (buf, this.head, this.len)
    }

    /// Installs a new block. Live elements must already be destroyed.
    fn install(&mut self, (buf, head, len): (RawBuf<T>, usize, usize)) {
        debug_assert_eq!(self.len, 0);
        self.buf = buf;
        self.head = head;
        self.len = len;
        self.version += 1;
        self.reallocations += 1;
    }

    /// Replaces the block with one twice as large.
    ///
    /// Live elements are re-centered with about a third of the new block free
    /// on each side, and at least one free slot at `end`.
    fn grow(&mut self, end: End) {
        let old_capacity = self.buf.capacity();
        let doubled = if old_capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            old_capacity
                .checked_mul(2)
                .unwrap_or_else(|| panic!("capacity overflow"))
        };
        let new_capacity = doubled.max(self.len + 1);

        let head = match end {
            End::Front => (new_capacity / 3).max(1),
            End::Back => (new_capacity / 3).min(new_capacity - self.len - 1),
        };

        let mut target = RawBuf::allocate(new_capacity);
        // Safety: the live range moves into a fresh block; afterwards the old
        // block holds no live elements and is released on drop
        unsafe { self.buf.relocate(self.head, self.len, &mut target, head) };
        drop(mem::replace(&mut self.buf, target));
        self.head = head;
        self.reallocations += 1;

        trace!(
            "trackvec: grew {:?} capacity {} -> {} with {} live elements (reallocation {})",
            self.id,
            old_capacity,
            new_capacity,
            self.len,
            self.reallocations
        );
    }

    /// Cursor at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self, self.index_of_end())
    }

    /// Read-only cursor at the first element.
    #[must_use]
    pub fn cbegin(&self) -> ConstCursor<T> {
        ConstCursor::new(self, 0)
    }

    /// Read-only cursor one past the last element.
    #[must_use]
    pub fn cend(&self) -> ConstCursor<T> {
        ConstCursor::new(self, self.index_of_end())
    }

    fn index_of_end(&self) -> isize {
        // A block never holds more than isize::MAX bytes, so len fits
        isize::try_from(self.len).unwrap_or(isize::MAX)
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// Returns an iterator that allows modifying each element.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// Writes `value` right after the live range without bumping the version.
    ///
    /// # Safety
    ///
    /// `tail_room()` must be non-zero.
    pub(crate) unsafe fn construct_back_unchecked(&mut self, value: T) {
        debug_assert!(self.tail_room() > 0);
        self.buf.construct_at(self.head + self.len, value);
        self.len += 1;
    }
}

impl<T> Drop for TrackedVec<T> {
    fn drop(&mut self) {
        self.destroy_elements();
    }
}

impl<T> Default for TrackedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for TrackedVec<T> {
    /// Deep copy into a block of the same capacity and layout.
    fn clone(&self) -> Self {
        let mut copy = Self::with_layout(self.capacity(), self.head);
        for item in self {
            // Safety: the copy mirrors the source layout, so there is a free slot
            unsafe { copy.construct_back_unchecked(item.clone()) };
        }
        copy
    }

    /// Copy assignment: tears down the old block before installing a copy.
    fn clone_from(&mut self, source: &Self) {
        self.destroy_elements();
        let copy = source.clone();
        self.install(copy.into_parts());
    }
}

impl<T: fmt::Debug> fmt::Debug for TrackedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for TrackedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for TrackedVec<T> {}

impl<T> Index<usize> for TrackedVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &T {
        let length = self.len;
        match self.get(index) {
            Some(item) => item,
            None => panic!("Index {index} out of bounds for vector of length {length}"),
        }
    }
}

impl<T> IndexMut<usize> for TrackedVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let length = self.len;
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("Index {index} out of bounds for vector of length {length}"),
        }
    }
}
