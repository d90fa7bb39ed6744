//! Explicit rounding direction for integer division.

/// Rounding direction for division on domain quantities.
///
/// Every division in the engine names its rounding direction at the call
/// site. Truncation always favours the pool: outputs round down, required
/// inputs round up.
///
/// # Examples
///
/// ```
/// use kswap::domain::{Amount, Rounding};
///
/// let n = Amount::new(10);
/// let d = Amount::new(3);
/// assert_eq!(n.checked_div(&d, Rounding::Down), Some(Amount::new(3)));
/// assert_eq!(n.checked_div(&d, Rounding::Up), Some(Amount::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
