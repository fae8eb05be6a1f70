//! Tree generation counter
//!
//! Incremented whenever the tree changes (children added or removed, any
//! attribute written or removed). Query results cached against an older
//! generation are stale.

/// Generation counter - incremented on every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Generation(u32);

impl Generation {
    /// Initial generation (never mutated)
    pub const INITIAL: Self = Generation(0);

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Get the next generation
    #[inline]
    pub const fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    /// Advance in place
    #[inline]
    pub fn bump(&mut self) {
        *self = self.next();
    }
}
