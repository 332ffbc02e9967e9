//! Test utilities and instrumented element types for Vessel development.
//!
//! Containers that manage element lifetimes by hand have two classic
//! failure modes: leaking a value and dropping one twice. The types here
//! make both observable:
//!
//! - [`DropTracker`] hands out [`Tracked`] values and counts every
//!   construction, clone, and drop. It can also be told to panic on the
//!   n-th clone.
//! - [`PanicOnDefault`](fixtures::PanicOnDefault) panics on the n-th
//!   `Default::default()` call.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

pub use fixtures::{expect_panic, PanicOnDefault};

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    clone_limit: Cell<Option<usize>>,
}

impl Counts {
    fn bump(cell: &Cell<usize>) {
        cell.set(cell.get() + 1);
    }
}

/// Shared counters for a family of [`Tracked`] values.
///
/// Cloning the tracker shares the counters.
#[derive(Clone, Default)]
pub struct DropTracker {
    counts: Rc<Counts>,
}

impl DropTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its clones and drops are counted by this tracker.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Counts::bump(&self.counts.created);
        Tracked {
            value,
            counts: Rc::clone(&self.counts),
        }
    }

    /// Make the clone after `successes` more clones panic.
    ///
    /// The limit counts from the clones already made.
    pub fn panic_on_clone_after(&self, successes: usize) {
        let limit = self.counts.clones.get() + successes;
        self.counts.clone_limit.set(Some(limit));
    }

    /// Remove any clone limit.
    pub fn allow_clones(&self) {
        self.counts.clone_limit.set(None);
    }

    /// Values created via [`track`](Self::track) or by cloning.
    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    /// Successful clones.
    pub fn clones(&self) -> usize {
        self.counts.clones.get()
    }

    /// Values dropped.
    pub fn drops(&self) -> usize {
        self.counts.drops.get()
    }

    /// Values created but not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.drops()
    }
}

/// A value whose clones and drops are reported to a [`DropTracker`].
///
/// # Panics
///
/// Dropping more values than were created panics with
/// `"double drop detected"`.
pub struct Tracked<T> {
    value: T,
    counts: Rc<Counts>,
}

impl<T> Tracked<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        if let Some(limit) = self.counts.clone_limit.get() {
            if self.counts.clones.get() >= limit {
                panic!("deliberate clone panic after {limit} clones");
            }
        }
        Counts::bump(&self.counts.clones);
        Counts::bump(&self.counts.created);
        Self {
            value: self.value.clone(),
            counts: Rc::clone(&self.counts),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        Counts::bump(&self.counts.drops);
        assert!(
            self.counts.drops.get() <= self.counts.created.get(),
            "double drop detected"
        );
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialEq> PartialEq<T> for Tracked<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
