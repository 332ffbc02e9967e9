//! Vessel: a growable contiguous container built in two layers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Vessel sub-crates. For most users, adding `vessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vessel::prelude::*;
//!
//! let mut a = DynamicArray::new();
//! a.push(1);
//! a.push(2);
//! a.push(3);
//! assert_eq!(a.capacity(), 4);
//!
//! a.insert(1, 9);
//! assert_eq!(a, [1, 9, 2, 3]);
//!
//! a.erase(0);
//! a.pop_back();
//! assert_eq!(a, [9, 2]);
//!
//! let mut b = DynamicArray::<u8>::with_len(3);
//! b.resize(5);
//! assert_eq!(b, [0; 5]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vessel-core` | `AllocError`, `GrowthPolicy` |
//! | [`raw`] | `vessel-raw` | `RawBlock`, relocation primitive |
//! | [`array`] | `vessel-array` | `DynamicArray`, `IntoIter`, `vessel!` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error types and growth policy (`vessel-core`).
pub use vessel_core as types;

/// Capacity-only raw storage (`vessel-raw`).
///
/// [`raw::RawBlock`] owns an allocation and never touches elements.
pub use vessel_raw as raw;

/// The growable array (`vessel-array`).
///
/// [`array::DynamicArray`] layers element construction and destruction on
/// top of a [`raw::RawBlock`].
pub use vessel_array as array;

pub use vessel_array::vessel;

/// Common imports for typical Vessel usage.
///
/// ```rust
/// use vessel::prelude::*;
/// ```
pub mod prelude {
    pub use vessel_array::{vessel, DynamicArray, IntoIter};
    pub use vessel_core::{AllocError, GrowthPolicy};
    pub use vessel_raw::RawBlock;
}
