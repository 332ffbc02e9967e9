//! Capacity-only raw storage for the Vessel containers.
//!
//! A [`RawBlock`] owns one allocation sized for `capacity` elements of
//! `T` and nothing else: it never constructs, reads, or drops elements.
//! Tracking which slots are live is the owner's job (see
//! `vessel_array::DynamicArray`). This crate is one of two that may
//! contain `unsafe` code (along with `vessel-array`).
//!
//! # Layering
//!
//! ```text
//! DynamicArray<T>            (vessel-array: live count, construct/destroy)
//! └── RawBlock<T>            (this crate: base pointer + capacity)
//!     └── raw::{allocate, deallocate, relocate}
//! ```
//!
//! All raw allocator calls and bulk element moves live in the private
//! `raw` module; every `unsafe` block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod block;
mod raw;

pub use block::RawBlock;
pub use raw::{layout_for, relocate};
pub use vessel_core::AllocError;
