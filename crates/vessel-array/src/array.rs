//! The [`DynamicArray`] container.
//!
//! Slots `[0, len)` of the owned [`RawBlock`] hold live values; slots
//! `[len, capacity)` are uninitialised. Every method below preserves that
//! split, including when an element constructor unwinds.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;
use std::slice;

use vessel_core::{AllocError, GrowthPolicy};
use vessel_raw::{relocate, RawBlock};

use crate::guard::fill_with;

/// A growable contiguous array with value semantics.
///
/// Appending is amortised `O(1)`: a full array grows to
/// `max(1, 2 * len)` slots (see [`GrowthPolicy::DOUBLING`]).
/// Explicit sizing ([`with_len`](Self::with_len),
/// [`reserve`](Self::reserve), [`resize`](Self::resize), cloning) allocates
/// exactly the requested capacity.
pub struct DynamicArray<T> {
    /// Raw storage. Slots `[0, len)` are live.
    storage: RawBlock<T>,
    /// Number of live elements. Always `<= storage.capacity()`.
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Create an empty array. Does not allocate.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: RawBlock::new(),
            len: 0,
        }
    }

    /// Create an empty array with room for exactly `capacity` elements.
    #[must_use]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RawBlock::with_capacity(capacity),
            len: 0,
        }
    }

    /// Create an array of `len` elements produced by `make(index)`.
    ///
    /// Capacity equals `len`. If `make` panics, the elements built so far
    /// are dropped and the allocation released.
    #[track_caller]
    pub fn from_fn(len: usize, make: impl FnMut(usize) -> T) -> Self {
        let mut storage = RawBlock::with_capacity(len);
        // SAFETY: the block is fresh, so all `len` slots are empty and writable.
        unsafe { fill_with(storage.as_mut_ptr(), len, make) };
        Self { storage, len }
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the array can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Size of the backing allocation in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.storage.memory_bytes()
    }

    /// Address of the first element (the `begin` position).
    ///
    /// Dangling but non-null when nothing is allocated.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable address of the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are live and the pointer is aligned and
        // non-null even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`; `&mut self` gives uniqueness.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len). Only checked by a
    /// debug assertion.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: caller guarantees `index < len`, so the slot is live.
        unsafe { &*self.storage.at(index) }
    }

    /// Mutable reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// Same contract as [`get_unchecked`](Self::get_unchecked).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: caller guarantees `index < len`, so the slot is live.
        unsafe { &mut *self.storage.at_mut(index) }
    }

    /// Grow the capacity to exactly `new_capacity` if it is larger than
    /// the current one.
    ///
    /// Unlike [`Vec::reserve`], the argument is the total capacity, not an
    /// additional count. On error the array is untouched.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let mut fresh = RawBlock::try_with_capacity(new_capacity)?;
        // SAFETY: `[0, len)` is live in the old block, the fresh block has
        // room for `new_capacity > len` slots, and the blocks are distinct.
        unsafe { relocate(self.storage.as_ptr(), fresh.as_mut_ptr(), self.len) };
        self.storage.swap(&mut fresh);
        // `fresh` now holds the old allocation with every slot moved out.
        Ok(())
    }

    /// Grow the capacity to exactly `new_capacity` if it is larger than
    /// the current one.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocator exhaustion is routed to
    /// [`std::alloc::handle_alloc_error`].
    #[track_caller]
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            err.into_panic();
        }
    }

    /// Make room for `additional` more elements, growing geometrically.
    ///
    /// Grows to `max(len + additional, DOUBLING.next_capacity(len))`, so a
    /// run of small bulk appends reallocates `O(log n)` times. No-op when
    /// the elements already fit. On error the array is untouched.
    pub(crate) fn try_grow_for(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                requested: self.len.saturating_add(additional),
                element_size: mem::size_of::<T>(),
            })?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let doubled = GrowthPolicy::DOUBLING
            .next_capacity(self.len)
            .unwrap_or(needed);
        self.try_reserve(needed.max(doubled))
    }

    /// Panicking form of [`try_grow_for`](Self::try_grow_for).
    #[track_caller]
    pub(crate) fn grow_for(&mut self, additional: usize) {
        if let Err(err) = self.try_grow_for(additional) {
            err.into_panic();
        }
    }

    /// Capacity a full array of `len` elements grows to on insertion.
    fn grown_capacity(len: usize) -> Result<usize, AllocError> {
        let policy = GrowthPolicy::DOUBLING;
        policy
            .next_capacity(len)
            .ok_or(AllocError::CapacityOverflow {
                requested: len.saturating_mul(policy.factor()),
                element_size: mem::size_of::<T>(),
            })
    }

    /// Resize to `new_len`, filling new slots with values from `make`.
    ///
    /// Shrinking drops the trailing elements. Growing reserves exactly
    /// `new_len` slots first. The new range is all-or-nothing: if `make`
    /// panics, the values already built for it are dropped and the length
    /// stays at its old value (the capacity may have grown).
    #[track_caller]
    pub fn resize_with(&mut self, new_len: usize, mut make: impl FnMut() -> T) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        // SAFETY: `reserve` made `[len, new_len)` valid, and those slots
        // are uninitialised.
        unsafe { fill_with(self.storage.at_mut(self.len), new_len - self.len, |_| make()) };
        self.len = new_len;
    }

    /// Drop the elements past `new_len`. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: `[new_len, new_len + tail)` were live and are no longer
        // counted by `len`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.at_mut(new_len), tail));
        }
    }

    /// Drop every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Construct a value with `make` at `index`, shifting the elements at
    /// and after `index` one slot toward the end.
    ///
    /// Returns a reference to the new element.
    ///
    /// When the array is full, a new block of
    /// [`GrowthPolicy::DOUBLING`] capacity is allocated and the value is
    /// built straight into its final slot there before any existing
    /// element is touched. If `make` panics, the array is unchanged
    /// (same length, capacity, and contents).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, or on capacity overflow.
    #[track_caller]
    pub fn emplace(&mut self, index: usize, make: impl FnOnce() -> T) -> &mut T {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        if len == self.capacity() {
            self.emplace_grow(index, make);
        } else {
            self.emplace_in_place(index, make);
        }
        self.len = len + 1;

        // SAFETY: the slot at `index` was just initialised.
        unsafe { &mut *self.storage.at_mut(index) }
    }

    /// Growing path of [`emplace`](Self::emplace). Leaves `len` to the caller.
    #[track_caller]
    fn emplace_grow(&mut self, index: usize, make: impl FnOnce() -> T) {
        let len = self.len;
        let new_capacity = Self::grown_capacity(len).unwrap_or_else(|err| err.into_panic());
        let mut fresh = RawBlock::<T>::with_capacity(new_capacity);

        // New element first: if `make` unwinds, only the empty `fresh`
        // block is released and the old storage is untouched.
        fresh.slot_mut(index).write(make());

        // Relocation is a bitwise move and cannot unwind, so once the new
        // element exists nothing below can fail part-way.
        let src = self.storage.as_ptr();
        let dst = fresh.as_mut_ptr();
        // SAFETY: `[0, len)` is live in the old block; the fresh block has
        // `new_capacity > len` slots of which only `index` is occupied; the
        // prefix goes to `[0, index)` and the suffix to `[index + 1, len + 1)`.
        unsafe {
            relocate(src, dst, index);
            relocate(src.add(index), dst.add(index + 1), len - index);
        }

        // The old block's slots were all moved out; dropping it frees memory only.
        self.storage.swap(&mut fresh);
    }

    /// Non-growing path of [`emplace`](Self::emplace). Leaves `len` to the caller.
    fn emplace_in_place(&mut self, index: usize, make: impl FnOnce() -> T) {
        // Build before shifting: a panic in `make` leaves the array untouched.
        let value = make();
        let len = self.len;
        // SAFETY: `len < capacity`, so slot `len` exists. `[index, len)` is
        // live and shifts by one into `[index + 1, len + 1)` (overlapping,
        // hence `ptr::copy`); slot `index` is then logically uninitialised.
        unsafe {
            let slot = self.storage.at_mut(index);
            if index < len {
                ptr::copy(slot, slot.add(1), len - index);
            }
            ptr::write(slot, value);
        }
    }

    /// Insert `value` at `index`, shifting later elements toward the end.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, || value)
    }

    /// Construct a value with `make` at the end and return a reference to it.
    #[track_caller]
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> &mut T {
        self.emplace(self.len, make)
    }

    /// Append `value`. Amortised `O(1)`.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Remove and return the element at `index`, shifting later elements
    /// one slot toward the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        // SAFETY: `index < len`, so the slot is live. After reading it out,
        // `[index + 1, len)` shifts down by one and the last slot is no
        // longer counted.
        unsafe {
            let slot = self.storage.at_mut(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drop the element at `index`, shifting later elements one slot toward
    /// the front.
    ///
    /// Returns `index`, which is now the position of the element that
    /// followed the erased one (or `len` if it was the last).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Remove and return the last element, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is no longer counted.
        Some(unsafe { ptr::read(self.storage.at(self.len)) })
    }

    /// Drop the last element.
    ///
    /// Calling this on an empty array is a logic error caught by a debug
    /// assertion; release builds do nothing.
    #[inline]
    pub fn pop_back(&mut self) {
        debug_assert!(self.len > 0, "pop_back on empty array");
        drop(self.pop());
    }

    /// Exchange contents with `other`. Constant time, never allocates.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Hand the storage, live elements included, to the caller and leave
    /// this array empty. The caller becomes responsible for the elements.
    pub(crate) fn take_storage(&mut self) -> RawBlock<T> {
        self.len = 0;
        self.storage.take()
    }
}

impl<T: Default> DynamicArray<T> {
    /// Create an array of `len` default-constructed elements.
    ///
    /// Capacity equals `len`. If `T::default` panics, the elements built
    /// so far are dropped and the allocation released.
    #[track_caller]
    pub fn with_len(len: usize) -> Self {
        Self::from_fn(len, |_| T::default())
    }

    /// Resize to `new_len`, default-constructing any new elements.
    ///
    /// See [`resize_with`](Self::resize_with) for the unwinding behaviour.
    #[track_caller]
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Create an array of `len` clones of `elem`.
    #[track_caller]
    pub fn from_elem(elem: T, len: usize) -> Self {
        Self::from_fn(len, |_| elem.clone())
    }

    /// Append clones of every element in `items`.
    ///
    /// Grows geometrically when the items do not fit, so repeated calls
    /// are amortised like [`push`](Self::push). If a clone panics, the
    /// clones made so far are dropped and the length is unchanged.
    #[track_caller]
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.grow_for(items.len());
        // `grow_for` succeeded, so this sum fits within the capacity.
        let new_len = self.len + items.len();
        // SAFETY: `grow_for` made `[len, new_len)` valid and uninitialised.
        unsafe { fill_with(self.storage.at_mut(self.len), items.len(), |i| items[i].clone()) };
        self.len = new_len;
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live. The block releases the allocation
        // afterwards without touching elements.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Clone into a block sized exactly to `self.len()`.
    fn clone(&self) -> Self {
        let items = self.as_slice();
        Self::from_fn(items.len(), |i| items[i].clone())
    }

    /// Assign from `source`, reusing this array's storage when it fits.
    ///
    /// If `source` is longer than this array's capacity, a full copy is
    /// built first and swapped in, so a panicking clone leaves `self`
    /// unchanged. Otherwise the overlapping prefix is assigned in place,
    /// surplus elements are dropped, and missing ones are cloned into the
    /// spare slots; a panic there leaves `self` valid but partially
    /// assigned.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let shared = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..shared]
            .iter_mut()
            .zip(&source.as_slice()[..shared])
        {
            dst.clone_from(src);
        }

        if source.len < self.len {
            self.truncate(source.len);
        } else {
            let extra = &source.as_slice()[shared..];
            // SAFETY: `source.len <= capacity`, so `[len, source.len)` is
            // valid and uninitialised.
            unsafe { fill_with(self.storage.at_mut(self.len), extra.len(), |i| extra[i].clone()) };
            self.len = source.len;
        }
    }
}
