//! Wraparound-aware serial numbers.
//!
//! Content hands out a serial for every size request and reports it back once
//! the size is committed. Serials increase monotonically but wrap at
//! `u32::MAX`, so ordering must go through [`Serial::delta`], never `<`.

use std::fmt;

/// A 32-bit serial correlating a request with its later commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Serial(u32);

impl Serial {
    /// Create a serial from its raw value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The serial following this one, wrapping at `u32::MAX`.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Signed distance from `other` to `self`.
    ///
    /// Positive when `self` is newer than `other`. Correct as long as the two
    /// serials are less than 2^31 apart.
    #[inline]
    pub const fn delta(self, other: Serial) -> i32 {
        self.0.wrapping_sub(other.0) as i32
    }

    /// Whether `self` was issued no later than `other`.
    #[inline]
    pub const fn is_at_or_before(self, other: Serial) -> bool {
        self.delta(other) <= 0
    }
}

impl From<u32> for Serial {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static_assertions::assert_impl_all!(Serial: Send, Sync, Copy);
