//! Generation counter and owner identity for fail-fast cursors.
//!
//! A set carries one `Generation` that is bumped on every structural
//! mutation. Cursors capture it at creation time and compare on every step.
//! `SetId` adds owner identity so a cursor cannot be replayed against a
//! different set whose counter happens to match.

use core::sync::atomic::{AtomicU64, Ordering};

/// Monotonic structural-mutation counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const fn new() -> Self {
        Generation(0)
    }

    #[inline]
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Process-unique identity of one set instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetId(u64);

impl SetId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
