//! Core types shared by the Vessel container crates.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the allocation error taxonomy and the capacity growth policy used by
//! [`vessel-raw`] and [`vessel-array`].
//!
//! [`vessel-raw`]: https://docs.rs/vessel-raw
//! [`vessel-array`]: https://docs.rs/vessel-array

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;

pub use error::AllocError;
pub use growth::GrowthPolicy;
