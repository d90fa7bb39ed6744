//! 256-bit intermediates over `u128`.
//!
//! The swap invariant and the share-issuance formulas multiply two full
//! `u128` quantities before dividing, so the intermediate product needs up
//! to 256 bits. This module provides the four operations the engine
//! needs — full-width multiply, multiply-then-divide with explicit
//! rounding, full-width product comparison, and a truncating Q64.64
//! fraction for the price accumulators — with no `unsafe` and no floating
//! point.

use crate::domain::Rounding;

const LO_MASK: u128 = (1u128 << 64) - 1;

/// A 256-bit unsigned product, split into high and low `u128` halves.
///
/// Field order gives the derived `Ord` the correct lexicographic
/// (hi, lo) comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Wide {
    hi: u128,
    lo: u128,
}

impl Wide {
    /// Full-width product of two `u128` values. Never overflows.
    #[must_use]
    pub fn product(a: u128, b: u128) -> Self {
        let (a_hi, a_lo) = (a >> 64, a & LO_MASK);
        let (b_hi, b_lo) = (b >> 64, b & LO_MASK);

        // Four 64x64 partial products, each at most (2^64 - 1)^2.
        let ll = a_lo * b_lo;
        let lh = a_lo * b_hi;
        let hl = a_hi * b_lo;
        let hh = a_hi * b_hi;

        let mid = (ll >> 64) + (lh & LO_MASK) + (hl & LO_MASK);
        let lo = (mid << 64) | (ll & LO_MASK);
        let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);

        Self { hi, lo }
    }

    /// Multiplies the 256-bit value by a small `u128` factor.
    ///
    /// Returns `None` if the result does not fit in 256 bits.
    #[must_use]
    pub fn checked_scale(self, factor: u128) -> Option<Self> {
        let scaled_hi = self.hi.checked_mul(factor)?;
        let low = Self::product(self.lo, factor);
        let hi = scaled_hi.checked_add(low.hi)?;
        Some(Self { hi, lo: low.lo })
    }

    /// High half of the product.
    #[must_use]
    pub const fn hi(&self) -> u128 {
        self.hi
    }

    /// Low half of the product.
    #[must_use]
    pub const fn lo(&self) -> u128 {
        self.lo
    }
}

/// Divides the 256-bit value `hi * 2^128 + lo` by `divisor`, returning
/// quotient and remainder.
///
/// Requires `divisor != 0` and `hi < divisor` so the quotient fits in
/// `u128`; both are the callers' responsibility inside this module.
fn div_rem(hi: u128, lo: u128, divisor: u128) -> (u128, u128) {
    debug_assert!(divisor != 0);
    debug_assert!(hi < divisor);

    let mut rem = hi;
    let mut quot = 0u128;
    // Long division, one bit of `lo` at a time. `rem < divisor` holds on
    // entry to every iteration; the shifted remainder is a 129-bit value
    // whose overflow bit forces a subtraction.
    let mut i = 128;
    while i > 0 {
        i -= 1;
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        if carry != 0 || rem >= divisor {
            rem = rem.wrapping_sub(divisor);
            quot |= 1u128 << i;
        }
    }
    (quot, rem)
}

/// Computes `a * b / divisor` with a 256-bit intermediate product.
///
/// Returns `None` if `divisor` is zero or the quotient does not fit in
/// `u128`.
#[must_use]
pub fn mul_div(a: u128, b: u128, divisor: u128, rounding: Rounding) -> Option<u128> {
    if divisor == 0 {
        return None;
    }
    let product = Wide::product(a, b);
    if product.hi >= divisor {
        return None;
    }
    let (quot, rem) = div_rem(product.hi, product.lo, divisor);
    match rounding {
        Rounding::Down => Some(quot),
        Rounding::Up if rem != 0 => quot.checked_add(1),
        Rounding::Up => Some(quot),
    }
}

/// Truncating Q64.64 ratio: the low 128 bits of `(numer << 64) / denom`.
///
/// Used by the cumulative-price accumulators, which wrap by design; an
/// integer part wider than 64 bits is silently truncated, matching the
/// accumulators' modular arithmetic.
///
/// Requires `denom != 0`.
#[must_use]
pub fn fraction_q64(numer: u128, denom: u128) -> u128 {
    debug_assert!(denom != 0);
    let hi = numer >> 64;
    let lo = numer << 64;
    let (quot, _) = div_rem(hi % denom, lo, denom);
    quot
}

/// Integer square root by Newton's method.
///
/// Converges from above, so the returned value `r` satisfies
/// `r*r <= n < (r+1)*(r+1)`.
#[must_use]
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = n / 2 + 1;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
