//! Raw asset quantity with checked arithmetic.

use core::fmt;

use super::Rounding;

/// A raw quantity in an asset's smallest unit.
///
/// `Amount` never interprets decimals — that responsibility lies with the
/// asset's [`TokenInfo`](crate::token::TokenInfo). Pool shares are
/// denominated in `Amount` too; they flow through the same ledger
/// machinery as any other fungible balance.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking. Division always
/// takes an explicit [`Rounding`] direction.
///
/// # Examples
///
/// ```
/// use kswap::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    ///
    /// Approving a spender for `Amount::MAX` is the unlimited-allowance
    /// convention: such allowances are never decremented.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    ///
    /// For products that may exceed `u128`, use
    /// [`math::wide::mul_div`](crate::math::wide::mul_div) instead.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0 / divisor.0;
        let r = self.0 % divisor.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            // r != 0 implies q < u128::MAX, so q + 1 cannot overflow.
            Rounding::Up if r != 0 => Some(Self(q + 1)),
            Rounding::Up => Some(Self(q)),
        }
    }

    /// Returns the smaller of two amounts.
    #[must_use]
    pub const fn min(&self, other: &Self) -> Self {
        if self.0 <= other.0 {
            *self
        } else {
            *other
        }
    }

    /// Saturating subtraction: clamps at zero instead of underflowing.
    ///
    /// Used where a negative delta means "nothing came in", e.g. deriving
    /// implied swap inputs from live balances.
    #[must_use]
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
