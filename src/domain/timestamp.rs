//! Injected wall-clock time.

use core::fmt;

/// A point in time, in whole seconds.
///
/// There is no ambient clock in the engine: operations that touch price
/// accumulators or deadlines receive the current `Timestamp` from the
/// caller, which keeps every run deterministic and testable.
///
/// # Examples
///
/// ```
/// use kswap::domain::Timestamp;
///
/// let t0 = Timestamp::new(100);
/// let t1 = Timestamp::new(130);
/// assert_eq!(t1.seconds_since(t0), 30);
/// assert!(t1.is_after(t0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from whole seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, saturating at zero if this
    /// timestamp precedes it.
    #[must_use]
    pub const fn seconds_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns `true` if this timestamp is strictly after `other`.
    #[must_use]
    pub const fn is_after(&self, other: Self) -> bool {
        self.0 > other.0
    }

    /// Returns this timestamp advanced by `seconds`, saturating at the
    /// maximum.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
