//! Off-line pricing at the 997/1000 fee convention.
//!
//! Pure functions over cached reserves: anything the router computes
//! before moving tokens, a caller can precompute here to choose bounds.
//! All arithmetic is integer-only with 256-bit intermediates; outputs
//! round down and required inputs round up, always in the pool's favour.

use log::trace;

use crate::domain::{Amount, AssetId, Rounding};
use crate::error::{AmmError, Result};
use crate::factory::Factory;
use crate::math::wide;
use crate::pair::{FEE_DENOMINATOR, FEE_NUMERATOR};

/// Equivalent value of `amount_a` at the current reserve ratio, with no
/// fee: `amount_a · reserve_b / reserve_a`.
///
/// Used for liquidity matching, not for swaps.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128`.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let value = wide::mul_div(
        amount_a.get(),
        reserve_b.get(),
        reserve_a.get(),
        Rounding::Down,
    )
    .ok_or(AmmError::Overflow("quoted amount"))?;
    Ok(Amount::new(value))
}

/// Output bought with `amount_in`, fee included:
/// `997·in·reserve_out / (1000·reserve_in + 997·in)`, rounded down.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] on intermediate overflow.
pub fn amount_out(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let in_with_fee = amount_in
        .checked_mul(&Amount::new(FEE_NUMERATOR))
        .ok_or(AmmError::Overflow("fee-scaled input"))?;
    let denominator = reserve_in
        .checked_mul(&Amount::new(FEE_DENOMINATOR))
        .and_then(|scaled| scaled.checked_add(&in_with_fee))
        .ok_or(AmmError::Overflow("output denominator"))?;
    let out = wide::mul_div(
        in_with_fee.get(),
        reserve_out.get(),
        denominator.get(),
        Rounding::Down,
    )
    .ok_or(AmmError::Overflow("output amount"))?;
    trace!("amount_out: {amount_in} in -> {out} out ({reserve_in}/{reserve_out})");
    Ok(Amount::new(out))
}

/// Input required to buy exactly `amount_out`:
/// `1000·reserve_in·out / (997·(reserve_out − out)) + 1`.
///
/// The `+ 1` makes the requirement strictly sufficient after truncation.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` reaches `reserve_out`.
/// - [`AmmError::Overflow`] on intermediate overflow.
pub fn amount_in(amount_out: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let scaled_out = amount_out
        .checked_mul(&Amount::new(FEE_DENOMINATOR))
        .ok_or(AmmError::Overflow("fee-scaled output"))?;
    let remaining = reserve_out
        .checked_sub(&amount_out)
        .ok_or(AmmError::Underflow("remaining reserve"))?;
    let denominator = remaining
        .checked_mul(&Amount::new(FEE_NUMERATOR))
        .ok_or(AmmError::Overflow("input denominator"))?;
    let quotient = wide::mul_div(
        reserve_in.get(),
        scaled_out.get(),
        denominator.get(),
        Rounding::Down,
    )
    .ok_or(AmmError::Overflow("input amount"))?;
    let required = Amount::new(quotient)
        .checked_add(&Amount::new(1))
        .ok_or(AmmError::Overflow("input amount"))?;
    trace!("amount_in: {required} in -> {amount_out} out ({reserve_in}/{reserve_out})");
    Ok(required)
}

/// Projects the full output chain of a multi-hop trade from each pool's
/// cached reserves. `amounts[0]` is the input; `amounts[i]` is the
/// quantity of `path[i]` flowing through the chain.
///
/// # Errors
///
/// - [`AmmError::InvalidPath`] for fewer than two assets.
/// - [`AmmError::UnknownPair`] for a hop with no pool.
/// - Any [`amount_out`] failure for a hop.
pub fn amounts_out(factory: &Factory, amount_in: Amount, path: &[AssetId]) -> Result<Vec<Amount>> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    for hop in path.windows(2) {
        let (reserve_in, reserve_out) = oriented_reserves(factory, hop[0], hop[1])?;
        let previous = amounts[amounts.len() - 1];
        amounts.push(amount_out(previous, reserve_in, reserve_out)?);
    }
    Ok(amounts)
}

/// Walks the path in reverse from the desired final output, producing
/// the required quantity at each position. `amounts[0]` is the input the
/// first pool must receive.
///
/// # Errors
///
/// - [`AmmError::InvalidPath`] for fewer than two assets.
/// - [`AmmError::UnknownPair`] for a hop with no pool.
/// - Any [`amount_in`] failure for a hop.
pub fn amounts_in(factory: &Factory, target_out: Amount, path: &[AssetId]) -> Result<Vec<Amount>> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = vec![Amount::ZERO; path.len()];
    amounts[path.len() - 1] = target_out;
    for i in (0..path.len() - 1).rev() {
        let (reserve_in, reserve_out) = oriented_reserves(factory, path[i], path[i + 1])?;
        amounts[i] = amount_in(amounts[i + 1], reserve_in, reserve_out)?;
    }
    Ok(amounts)
}

/// Cached reserves of the pool for `(from, to)`, oriented so the first
/// element is the `from` side.
fn oriented_reserves(factory: &Factory, from: AssetId, to: AssetId) -> Result<(Amount, Amount)> {
    let id = factory.get_pair(&from, &to).ok_or(AmmError::UnknownPair)?;
    let pair = factory.pair(id)?;
    let (reserve_a, reserve_b, _) = pair.reserves();
    if from == pair.key().asset_a() {
        Ok((reserve_a, reserve_b))
    } else {
        Ok((reserve_b, reserve_a))
    }
}
