//! The [`RawBlock`] storage type.
//!
//! A [`RawBlock`] is a base pointer plus a capacity. Slots are exposed
//! as `MaybeUninit<T>` because the block does not know which of them
//! hold live values.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::slice;

use vessel_core::AllocError;

use crate::raw;

/// Owned, uninitialised storage for `capacity` elements of `T`.
///
/// The block allocates once at construction and releases the allocation
/// on drop. It never constructs or drops elements: every slot is either
/// uninitialised or holds a value whose lifetime the owner manages.
/// Dropping a block that still holds live values leaks them.
///
/// A block is move-only. Copying raw storage without knowing which slots
/// are live would duplicate ownership, so there is no `Clone` impl.
pub struct RawBlock<T> {
    /// Start of the allocation. Dangling when nothing is allocated.
    ptr: NonNull<T>,
    /// Number of `T` slots the allocation holds.
    capacity: usize,
    /// The block logically owns `T` values (for drop check and variance).
    _owns: PhantomData<T>,
}

// SAFETY: a block is a uniquely owned allocation, like `Box<[MaybeUninit<T>]>`.
unsafe impl<T: Send> Send for RawBlock<T> {}
// SAFETY: shared access only hands out `&MaybeUninit<T>`.
unsafe impl<T: Sync> Sync for RawBlock<T> {}

impl<T> RawBlock<T> {
    /// Create an empty block with zero capacity. Does not allocate.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate a block for exactly `capacity` elements.
    ///
    /// Capacity zero yields an unallocated block. Returns
    /// [`AllocError::CapacityOverflow`] if the byte size is not
    /// representable, or [`AllocError::Exhausted`] if the allocator fails.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let ptr = raw::allocate::<T>(capacity)?;
        Ok(Self {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    /// Allocate a block for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocator exhaustion is routed to
    /// [`std::alloc::handle_alloc_error`].
    #[must_use]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| err.into_panic())
    }

    /// Number of element slots in the block.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Base address of the block.
    ///
    /// Dangling (but aligned and non-null) when nothing is allocated.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable base address of the block.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of the slot at `offset`.
    ///
    /// `offset == capacity` (one past the last slot) is allowed.
    ///
    /// # Safety
    ///
    /// `offset` must not exceed [`capacity`](Self::capacity). Only checked
    /// by a debug assertion.
    #[inline]
    pub unsafe fn at(&self, offset: usize) -> *const T {
        debug_assert!(
            offset <= self.capacity,
            "offset {offset} out of range for block of capacity {}",
            self.capacity
        );
        // SAFETY: caller guarantees `offset <= capacity`, which stays
        // within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Mutable address of the slot at `offset`.
    ///
    /// # Safety
    ///
    /// Same contract as [`at`](Self::at).
    #[inline]
    pub unsafe fn at_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "offset {offset} out of range for block of capacity {}",
            self.capacity
        );
        // SAFETY: as for `at`.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// The slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[track_caller]
    pub fn slot(&self, index: usize) -> &MaybeUninit<T> {
        &self.as_uninit_slice()[index]
    }

    /// The mutable slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[track_caller]
    pub fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        &mut self.as_uninit_slice_mut()[index]
    }

    /// All slots as possibly-uninitialised values.
    #[inline]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: the allocation holds `capacity` slots (or `T` is
        // zero-sized, or capacity is zero with a dangling aligned
        // pointer). `MaybeUninit<T>` has no validity requirement.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// All slots as mutable possibly-uninitialised values.
    #[inline]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: as for `as_uninit_slice`; `&mut self` gives uniqueness.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Exchange allocations with `other`. Constant time, never allocates.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Take the allocation out of this block, leaving it empty.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Size of the allocation in bytes. Zero when nothing is allocated.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * mem::size_of::<T>()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        // SAFETY: `ptr` and `capacity` always describe an allocation from
        // `raw::allocate` (or an unallocated block, which is a no-op).
        unsafe { raw::deallocate(self.ptr, self.capacity) };
    }
}

impl<T> Default for RawBlock<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RawBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBlock")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vessel_test_utils::DropTracker;

    #[test]
    fn new_block_is_empty() {
        let block = RawBlock::<u32>::new();
        assert_eq!(block.capacity(), 0);
        assert_eq!(block.memory_bytes(), 0);
        assert!(block.as_uninit_slice().is_empty());
    }

    #[test]
    fn with_capacity_sizes_exactly() {
        let block = RawBlock::<u64>::with_capacity(10);
        assert_eq!(block.capacity(), 10);
        assert_eq!(block.memory_bytes(), 80);
        assert_eq!(block.as_uninit_slice().len(), 10);
    }

    #[test]
    fn slots_hold_written_values() {
        let mut block = RawBlock::<u32>::with_capacity(4);
        block.slot_mut(0).write(7);
        block.slot_mut(3).write(9);
        // SAFETY: slots 0 and 3 were written above.
        let (a, b) = unsafe { (block.slot(0).assume_init_read(), block.slot(3).assume_init_read()) };
        assert_eq!((a, b), (7, 9));
    }

    #[test]
    #[should_panic]
    fn slot_out_of_range_panics() {
        let block = RawBlock::<u32>::with_capacity(2);
        let _ = block.slot(2);
    }

    #[test]
    fn one_past_end_address_is_reachable() {
        let block = RawBlock::<u16>::with_capacity(3);
        // SAFETY: offset == capacity is allowed.
        let end = unsafe { block.at(3) };
        assert_eq!(end as usize - block.as_ptr() as usize, 6);
    }

    #[test]
    fn swap_exchanges_allocations() {
        let mut a = RawBlock::<u8>::with_capacity(4);
        let mut b = RawBlock::<u8>::with_capacity(16);
        let (pa, pb) = (a.as_ptr(), b.as_ptr());
        a.swap(&mut b);
        assert_eq!(a.capacity(), 16);
        assert_eq!(b.capacity(), 4);
        assert_eq!(a.as_ptr(), pb);
        assert_eq!(b.as_ptr(), pa);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = RawBlock::<u8>::with_capacity(5);
        let ptr = a.as_ptr();
        let b = a.take();
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.capacity(), 5);
        assert_eq!(b.as_ptr(), ptr);
    }

    #[test]
    fn drop_never_drops_elements() {
        let tracker = DropTracker::new();
        let mut block = RawBlock::with_capacity(2);
        block.slot_mut(0).write(tracker.track(1));
        block.slot_mut(1).write(tracker.track(2));
        // Move the values out before the block goes away.
        // SAFETY: both slots were written above and are read once.
        let values = unsafe { [block.slot(0).assume_init_read(), block.slot(1).assume_init_read()] };
        drop(block);
        assert_eq!(tracker.drops(), 0);
        drop(values);
        assert_eq!(tracker.drops(), 2);
    }

    #[test]
    fn zero_sized_elements_report_capacity() {
        let block = RawBlock::<()>::with_capacity(1000);
        assert_eq!(block.capacity(), 1000);
        assert_eq!(block.memory_bytes(), 0);
    }

    #[test]
    fn huge_request_is_capacity_overflow() {
        let err = RawBlock::<u64>::try_with_capacity(usize::MAX).unwrap_err();
        assert!(matches!(err, AllocError::CapacityOverflow { .. }));
    }

    #[cfg(not(miri))]
    #[test]
    fn unsatisfiable_request_is_exhausted() {
        let err = RawBlock::<u8>::try_with_capacity(isize::MAX as usize).unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { .. }));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn capacity_matches_request(cap in 0usize..4096) {
                let block = RawBlock::<u32>::with_capacity(cap);
                prop_assert_eq!(block.capacity(), cap);
                prop_assert_eq!(block.memory_bytes(), cap * 4);
            }

            #[test]
            fn swap_twice_is_identity(a in 0usize..256, b in 0usize..256) {
                let mut x = RawBlock::<u16>::with_capacity(a);
                let mut y = RawBlock::<u16>::with_capacity(b);
                x.swap(&mut y);
                x.swap(&mut y);
                prop_assert_eq!(x.capacity(), a);
                prop_assert_eq!(y.capacity(), b);
            }
        }
    }
}
