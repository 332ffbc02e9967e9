//! Error types for the Vessel container crates.
//!
//! Allocation is the only recoverable failure a container can report.
//! Element construction failures surface as panics from the element
//! type's own `Default` or `Clone` impls and are never wrapped here.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors from acquiring raw storage for elements.
///
/// Returned by the `try_*` entry points. The infallible entry points turn
/// an `AllocError` into a divergence via [`AllocError::into_panic`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested element count does not fit in a valid allocation
    /// size (`count * size_of::<T>()` overflows or exceeds `isize::MAX`).
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },
    /// The global allocator could not satisfy the request.
    Exhausted {
        /// The layout that was passed to the allocator.
        layout: Layout,
    },
}

impl AllocError {
    /// Diverge on this error the way the standard collections do.
    ///
    /// [`Exhausted`](Self::Exhausted) is routed to
    /// [`std::alloc::handle_alloc_error`], which aborts by default.
    /// [`CapacityOverflow`](Self::CapacityOverflow) panics.
    #[cold]
    #[track_caller]
    pub fn into_panic(self) -> ! {
        match self {
            Self::Exhausted { layout } => std::alloc::handle_alloc_error(layout),
            Self::CapacityOverflow { .. } => panic!("{self}"),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow {
                requested,
                element_size,
            } => {
                write!(
                    f,
                    "capacity overflow: {requested} elements of {element_size} bytes"
                )
            }
            Self::Exhausted { layout } => {
                write!(
                    f,
                    "allocation of {} bytes (align {}) failed",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}
