//! Growable contiguous array built on [`vessel_raw::RawBlock`].
//!
//! [`DynamicArray`] separates "how much space is reserved" from "how
//! many values are alive": the [`RawBlock`](vessel_raw::RawBlock) it owns
//! tracks capacity only, and the array constructs and drops elements in
//! place within it.
//!
//! # Guarantees under unwinding
//!
//! A panic from an element's `Default`, `Clone`, or a caller-supplied
//! constructor closure unwinds through the array without leaking or
//! double-dropping anything:
//!
//! - Operations that build into a fresh block before committing
//!   (`clone`, reallocating `clone_from`, growing `emplace`) leave the
//!   array exactly as it was.
//! - Operations that work in existing storage (`clone_from` reuse,
//!   `resize` tail construction) leave the array valid with `len`
//!   counting exactly the live elements.
//!
//! # Example
//!
//! ```rust
//! use vessel_array::{vessel, DynamicArray};
//!
//! let mut a: DynamicArray<i32> = vessel![1, 2, 3];
//! a.insert(1, 9);
//! assert_eq!(a, [1, 9, 2, 3]);
//! a.erase(0);
//! a.pop_back();
//! assert_eq!(a, [9, 2]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
mod guard;
pub mod iter;
mod macros;
mod traits;

pub use array::DynamicArray;
pub use iter::IntoIter;
pub use vessel_core::{AllocError, GrowthPolicy};
