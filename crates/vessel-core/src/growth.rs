//! Capacity growth policy.

/// How a full container picks its next capacity.
///
/// An empty container grows to `min_capacity`; a non-empty one multiplies
/// its length by `factor`. Geometric growth keeps the total relocation
/// cost of `n` appends at `O(n)`. Validated at construction; values are
/// immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity chosen when growing from zero elements.
    ///
    /// Default: 1. Must be at least 1.
    min_capacity: usize,

    /// Multiplier applied to the current length when growing.
    ///
    /// Default: 2. Must be at least 2.
    factor: usize,
}

impl GrowthPolicy {
    /// Default capacity when growing an empty container.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// Default growth multiplier.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Capacity sequence `0 → 1 → 2 → 4 → 8 → …`.
    pub const DOUBLING: Self = Self::new(Self::DEFAULT_MIN_CAPACITY, Self::DEFAULT_FACTOR);

    /// Create a policy.
    ///
    /// # Panics
    ///
    /// Panics if `min_capacity` is zero or `factor` is less than 2, since
    /// either would let a full container "grow" without gaining a slot.
    pub const fn new(min_capacity: usize, factor: usize) -> Self {
        assert!(min_capacity >= 1, "growth policy min_capacity must be >= 1");
        assert!(factor >= 2, "growth policy factor must be >= 2");
        Self {
            min_capacity,
            factor,
        }
    }

    /// Capacity used when growing from zero elements.
    pub const fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Growth multiplier.
    pub const fn factor(&self) -> usize {
        self.factor
    }

    /// Capacity to grow to when a container holding `len` elements is full.
    ///
    /// This is `max(min_capacity, len * factor)`. Returns `None` if the
    /// multiplication overflows `usize`.
    pub const fn next_capacity(&self, len: usize) -> Option<usize> {
        match len.checked_mul(self.factor) {
            Some(scaled) if scaled < self.min_capacity => Some(self.min_capacity),
            scaled => scaled,
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DOUBLING
    }
}
