//! Benchmark workloads for the Vessel containers.
//!
//! - [`SMALL`], [`MEDIUM`], [`LARGE`]: element counts shared by the benches
//! - [`filled`]: an array of `n` sequential values at exact capacity
//! - [`insert_positions`]: a deterministic spread of insertion indices

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use vessel::array::DynamicArray;

/// Fits in a cache line or two for word-sized elements.
pub const SMALL: usize = 16;
/// Typical working-set size.
pub const MEDIUM: usize = 1_000;
/// Large enough for growth and relocation to dominate.
pub const LARGE: usize = 100_000;

/// Build an array holding `0..n` with capacity exactly `n`.
pub fn filled(n: usize) -> DynamicArray<u64> {
    DynamicArray::from_fn(n, |i| i as u64)
}

/// `count` insertion indices, each valid for an array that starts empty
/// and gains one element per insertion.
///
/// Uses a fixed linear congruential sequence so every run inserts at the
/// same positions.
pub fn insert_positions(count: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..count)
        .map(|len| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as usize) % (len + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_is_exact() {
        let a = filled(MEDIUM);
        assert_eq!(a.len(), MEDIUM);
        assert_eq!(a.capacity(), MEDIUM);
        assert_eq!(a[MEDIUM - 1], (MEDIUM - 1) as u64);
    }

    #[test]
    fn insert_positions_are_valid_and_deterministic() {
        let positions = insert_positions(SMALL, 42);
        for (len, &p) in positions.iter().enumerate() {
            assert!(p <= len);
        }
        assert_eq!(positions, insert_positions(SMALL, 42));
    }
}
