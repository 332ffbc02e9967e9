//! Low-level primitives for raw element storage.
//!
//! The only place in this crate that talks to the global allocator or
//! moves element bits. Each `unsafe` operation carries a mandatory
//! `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::mem;
use std::ptr::{self, NonNull};

use vessel_core::AllocError;

/// Layout of an array of `capacity` elements of `T`.
///
/// Fails with [`AllocError::CapacityOverflow`] if the byte size would
/// exceed `isize::MAX`.
pub fn layout_for<T>(capacity: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow {
        requested: capacity,
        element_size: mem::size_of::<T>(),
    })
}

/// True when storage for `capacity` elements needs no real allocation.
#[inline]
fn is_unallocated<T>(capacity: usize) -> bool {
    capacity == 0 || mem::size_of::<T>() == 0
}

/// Acquire uninitialised storage for `capacity` elements of `T`.
///
/// Zero capacity and zero-sized `T` yield a dangling, well-aligned
/// pointer without touching the allocator.
pub(crate) fn allocate<T>(capacity: usize) -> Result<NonNull<T>, AllocError> {
    let layout = layout_for::<T>(capacity)?;
    if is_unallocated::<T>(capacity) {
        return Ok(NonNull::dangling());
    }
    // SAFETY: `layout` has non-zero size because `capacity > 0` and `T`
    // is not zero-sized.
    let ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or(AllocError::Exhausted { layout })
}

/// Release storage obtained from [`allocate`].
///
/// # Safety
///
/// `ptr` must come from `allocate::<T>(capacity)` with the same
/// `capacity`, and must not be used afterwards. Any live elements in the
/// storage are leaked, not dropped.
pub(crate) unsafe fn deallocate<T>(ptr: NonNull<T>, capacity: usize) {
    if is_unallocated::<T>(capacity) {
        return;
    }
    if let Ok(layout) = Layout::array::<T>(capacity) {
        // SAFETY: caller guarantees `ptr` was allocated with exactly this
        // layout, which `allocate` computed the same way.
        unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
    }
}

/// Move `count` live elements from `src` into uninitialised slots at `dst`.
///
/// Rust moves are bitwise and never run user code, so relocation cannot
/// fail part-way: there is no copy fallback. After the call the source
/// slots are logically uninitialised and must not be dropped.
///
/// # Safety
///
/// - `src` must point to `count` live, initialised elements.
/// - `dst` must be valid for writes of `count` elements.
/// - The two ranges must not overlap.
#[inline]
pub unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded from the caller's contract above.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) };
}
