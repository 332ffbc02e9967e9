//! Reusable element fixtures for panic-safety tests.
//!
//! - [`PanicOnDefault`]: panics deterministically after N default
//!   constructions and counts live instances.
//! - [`expect_panic`]: runs a closure and asserts that it unwinds.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

thread_local! {
    static DEFAULT_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// An element type whose `Default` impl can be armed to panic.
///
/// Counters are thread-local, so tests running in parallel on separate
/// threads do not see each other's instances.
#[derive(Debug, PartialEq, Eq)]
pub struct PanicOnDefault(u32);

impl PanicOnDefault {
    /// Value produced by `Default::default()`.
    pub const DEFAULT_VALUE: u32 = 7;

    /// Build an instance directly, bypassing the default budget.
    pub fn new(value: u32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Allow `successes` more default constructions, then panic.
    pub fn arm(successes: usize) {
        DEFAULT_BUDGET.with(|budget| budget.set(Some(successes)));
    }

    /// Let default construction succeed again.
    pub fn disarm() {
        DEFAULT_BUDGET.with(|budget| budget.set(None));
    }

    /// Instances alive on this thread.
    pub fn live() -> usize {
        LIVE.with(Cell::get)
    }
}

impl Default for PanicOnDefault {
    fn default() -> Self {
        DEFAULT_BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("deliberate default panic"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        Self::new(Self::DEFAULT_VALUE)
    }
}

impl Clone for PanicOnDefault {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for PanicOnDefault {
    fn drop(&mut self) {
        LIVE.with(|live| {
            let n = live.get();
            assert!(n > 0, "double drop detected");
            live.set(n - 1);
        });
    }
}

/// Run `f` and assert that it panics.
///
/// # Panics
///
/// Panics if `f` returns normally.
pub fn expect_panic<R>(f: impl FnOnce() -> R) {
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    assert!(result.is_err(), "expected the closure to panic");
}
