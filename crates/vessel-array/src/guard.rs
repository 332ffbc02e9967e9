//! Drop guard for runs of freshly constructed elements.
//!
//! [`InitGuard`] tracks how many slots past a start pointer have been
//! written. If construction unwinds before [`InitGuard::commit`], the
//! guard drops exactly those slots, so a half-built run never leaks.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

/// Owns the initialised prefix of a run of slots until committed.
pub(crate) struct InitGuard<T> {
    start: *mut T,
    initialized: usize,
}

impl<T> InitGuard<T> {
    /// Start guarding slots beginning at `start`.
    pub(crate) fn new(start: *mut T) -> Self {
        Self {
            start,
            initialized: 0,
        }
    }

    /// Hand the initialised run over to the caller.
    pub(crate) fn commit(self) -> usize {
        let n = self.initialized;
        mem::forget(self);
        n
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` slots from `start` were written
        // and not yet handed to an owner.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.initialized));
        }
    }
}

/// Construct `count` values into uninitialised slots starting at `dst`.
///
/// All-or-nothing: if `make` panics, the values built so far are dropped
/// before the panic propagates and no slot is left initialised.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` elements, and the slots must
/// not hold live values (they would be overwritten without a drop).
pub(crate) unsafe fn fill_with<T>(dst: *mut T, count: usize, mut make: impl FnMut(usize) -> T) {
    let mut guard = InitGuard::new(dst);
    for i in 0..count {
        let value = make(i);
        // SAFETY: `i < count`, so the slot is in range per the contract.
        unsafe { ptr::write(dst.add(i), value) };
        guard.initialized += 1;
    }
    guard.commit();
}
