//! Raw slot storage for `TrackedVec`.
//!
//! A `RawBuf<T>` owns a block of `capacity` uninitialized slots. It never
//! tracks which slots hold live elements: the owner keeps that range and is
//! responsible for constructing into empty slots and destroying live ones.
//! Dropping a `RawBuf` releases the memory without touching element
//! lifetimes.

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> RawBuf<T> {
    /// Storage with no slots and no allocation.
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for `capacity` elements without initializing any of them.
    ///
    /// A capacity of 0 (or a zero-sized `T`) performs no allocation.
    /// Allocation failure is fatal and goes through `handle_alloc_error`.
    pub(crate) fn allocate(capacity: usize) -> Self {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            };
        }

        let layout = Self::layout(capacity);
        // Safety: layout has non-zero size (capacity > 0 and T is not a ZST)
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            handle_alloc_error(layout)
        };

        Self {
            ptr,
            capacity,
            _marker: PhantomData,
        }
    }

    fn layout(capacity: usize) -> Layout {
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn slot(&self, slot: usize) -> *mut T {
        debug_assert!(slot <= self.capacity, "slot {slot} past capacity {}", self.capacity);
        // Safety: slot <= capacity keeps the pointer inside (or one past) the block
        unsafe { self.ptr.as_ptr().add(slot) }
    }

    /// Moves `value` into `slot`.
    ///
    /// # Safety
    ///
    /// `slot < capacity` and the slot must not hold a live element.
    #[inline]
    pub(crate) unsafe fn construct_at(&mut self, slot: usize, value: T) {
        debug_assert!(slot < self.capacity);
        ptr::write(self.slot(slot), value);
    }

    /// Runs the destructor of the element in `slot`.
    ///
    /// # Safety
    ///
    /// The slot must hold a live element; afterwards it is uninitialized.
    #[inline]
    pub(crate) unsafe fn destroy_at(&mut self, slot: usize) {
        debug_assert!(slot < self.capacity);
        ptr::drop_in_place(self.slot(slot));
    }

    /// Moves the element out of `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// The slot must hold a live element.
    #[inline]
    pub(crate) unsafe fn take_at(&mut self, slot: usize) -> T {
        debug_assert!(slot < self.capacity);
        ptr::read(self.slot(slot))
    }

    /// Destroys the `len` live elements starting at `start`.
    ///
    /// # Safety
    ///
    /// Every slot in `start..start + len` must hold a live element.
    pub(crate) unsafe fn destroy_range(&mut self, start: usize, len: usize) {
        debug_assert!(start + len <= self.capacity);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slot(start), len));
    }

    /// Moves `len` live elements starting at `start` into `target` at
    /// `target_start`, preserving order.
    ///
    /// The source slots are uninitialized afterwards.
    ///
    /// # Safety
    ///
    /// Source slots must be live, target slots must be uninitialized, and both
    /// ranges must lie within their blocks.
    pub(crate) unsafe fn relocate(
        &mut self,
        start: usize,
        len: usize,
        target: &mut RawBuf<T>,
        target_start: usize,
    ) {
        debug_assert!(start + len <= self.capacity);
        debug_assert!(target_start + len <= target.capacity);
        ptr::copy_nonoverlapping(self.slot(start), target.slot(target_start), len);
    }

    /// # Safety
    ///
    /// The slot must hold a live element.
    #[inline]
    pub(crate) unsafe fn get(&self, slot: usize) -> &T {
        &*self.slot(slot)
    }

    /// # Safety
    ///
    /// The slot must hold a live element.
    #[inline]
    pub(crate) unsafe fn get_mut(&mut self, slot: usize) -> &mut T {
        &mut *self.slot(slot)
    }

    /// # Safety
    ///
    /// Every slot in `start..start + len` must hold a live element.
    #[inline]
    pub(crate) unsafe fn slice(&self, start: usize, len: usize) -> &[T] {
        core::slice::from_raw_parts(self.slot(start), len)
    }

    /// # Safety
    ///
    /// Every slot in `start..start + len` must hold a live element.
    #[inline]
    pub(crate) unsafe fn slice_mut(&mut self, start: usize, len: usize) -> &mut [T] {
        core::slice::from_raw_parts_mut(self.slot(start), len)
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // Safety: the block was allocated by `allocate` with this exact layout
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.capacity)) };
    }
}
