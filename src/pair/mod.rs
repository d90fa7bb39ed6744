//! Constant-product pair pool (the reserve state machine).
//!
//! A [`Pair`] owns two cached reserves and an issued-shares ledger for
//! exactly one canonically ordered asset pair. The swap invariant is
//! `reserve_a × reserve_b = k`: after fees, `k` never decreases across a
//! swap, and rounding always truncates in the pool's favour.
//!
//! # Swap settlement (first asset in → second asset out)
//!
//! 1. requested outputs are transferred out optimistically
//! 2. the optional flash borrower runs against the *locked* pool
//! 3. live balances are read back; implied inputs are
//!    `balance − (reserve − amount_out)`
//! 4. the fee-adjusted product check runs at scale 1000:
//!    `(1000·balance_a − 3·in_a) · (1000·balance_b − 3·in_b) ≥ k · 1000²`
//! 5. reserves resync to the live balances
//!
//! The transfer-before-verify ordering is what makes flash swaps
//! possible, and it is exactly why every mutating operation holds the
//! single-writer guard for its full duration: a reentrant call between
//! the transfer and the resync could otherwise drain reserves before the
//! product check runs.
//!
//! # Atomicity
//!
//! Each mutating operation snapshots the pair and the bank before
//! touching either and restores both wholesale on any error, so a failed
//! call leaves no trace — including in the event journal.

use log::debug;

use crate::domain::{AccountId, Amount, PairEvent, PairKey, Rounding, Timestamp};
use crate::error::{AmmError, Result};
use crate::math::wide::{self, Wide};
use crate::token::{Bank, Ledger};

#[cfg(test)]
mod proptest_properties;

/// Share quantity permanently burned to the sink account on genesis mint.
///
/// Raises the floor of `total_shares` forever, which defends against the
/// first-depositor share-price manipulation attack.
pub const MINIMUM_LIQUIDITY: Amount = Amount::new(1_000);

/// Fee-retaining numerator of the swap fee: 997/1000 ⇒ 0.3% fee.
pub const FEE_NUMERATOR: u128 = 997;

/// Fixed-point scale for all fee arithmetic.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Callback invoked by [`Pair::swap`] after the optimistic transfer.
///
/// Enables the single-operation borrow-then-repay pattern: the borrower
/// receives the requested outputs first, may use them, and must leave
/// enough input in the pool's custody for the product check to pass.
///
/// The callback receives the pool with its reentrancy guard held; any
/// attempt to call back into `mint`, `burn`, or `swap` on the same pool
/// fails with [`AmmError::ReentrantCall`]. Returning an error aborts the
/// whole swap and rolls every transfer back.
pub trait FlashBorrower {
    /// Called with the outputs already transferred to the recipient.
    fn on_flash_swap(
        &mut self,
        pair: &mut Pair,
        bank: &mut Bank,
        initiator: AccountId,
        amount_a_out: Amount,
        amount_b_out: Amount,
    ) -> Result<()>;
}

/// A constant-product pool for one unordered asset pair.
///
/// Created once by the [`Factory`](crate::factory::Factory) and never
/// destroyed; a fully drained pool remains addressable and can be
/// reseeded by a later mint. Pricing is authoritative from the *cached*
/// reserves, which may lag the live balances while an operation is in
/// flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: PairKey,
    account: AccountId,
    reserve_a: Amount,
    reserve_b: Amount,
    shares: Ledger,
    price_a_cumulative: u128,
    price_b_cumulative: u128,
    last_update: Timestamp,
    k_last: Amount,
    locked: bool,
    events: Vec<PairEvent>,
}

impl Pair {
    /// Creates the pool for `key`, custodied at `account`.
    ///
    /// Invoked exactly once per canonical key, by the factory; the
    /// identical-assets check and canonical ordering already happened in
    /// [`PairKey::new`].
    pub(crate) fn new(key: PairKey, account: AccountId, now: Timestamp) -> Self {
        Self {
            key,
            account,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            shares: Ledger::new(),
            price_a_cumulative: 0,
            price_b_cumulative: 0,
            last_update: now,
            k_last: Amount::ZERO,
            locked: false,
            events: Vec::new(),
        }
    }

    // -- reads (no lock) ----------------------------------------------------

    /// The canonical asset pair this pool prices.
    #[must_use]
    pub const fn key(&self) -> PairKey {
        self.key
    }

    /// The pool's custody account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Cached reserves and the time of the last resync.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount, Timestamp) {
        (self.reserve_a, self.reserve_b, self.last_update)
    }

    /// Cumulative time-weighted price of the first asset, Q64.64, wrapping.
    #[must_use]
    pub const fn price_a_cumulative(&self) -> u128 {
        self.price_a_cumulative
    }

    /// Cumulative time-weighted price of the second asset, Q64.64, wrapping.
    #[must_use]
    pub const fn price_b_cumulative(&self) -> u128 {
        self.price_b_cumulative
    }

    /// Total issued pool shares, including the permanently burned minimum.
    #[must_use]
    pub fn total_shares(&self) -> Amount {
        self.shares.total_supply()
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn share_balance_of(&self, holder: &AccountId) -> Amount {
        self.shares.balance_of(holder)
    }

    /// Read access to the LP share ledger (balances, allowances, events).
    #[must_use]
    pub const fn shares(&self) -> &Ledger {
        &self.shares
    }

    /// Observable log of this pool's operations, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PairEvent] {
        &self.events
    }

    // -- share transfers (plain ledger ops, not reserve-affecting) ----------

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds fewer
    /// shares.
    pub fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.shares.transfer(from, to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    pub fn approve_shares(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        self.shares.approve(owner, spender, amount);
    }

    /// Moves `amount` shares from `from` to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientAllowance`] or
    /// [`AmmError::InsufficientBalance`].
    pub fn transfer_shares_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.shares.transfer_from(spender, from, to, amount)
    }

    // -- mutating operations -------------------------------------------------

    /// Issues pool shares against assets already transferred into the
    /// pool's custody.
    ///
    /// Reads the live balances of both assets, takes the delta over the
    /// cached reserves as the deposit, and issues shares to `to`:
    ///
    /// - genesis (`total_shares == 0`): `√(Δa · Δb) − MINIMUM_LIQUIDITY`
    ///   to `to`, with the minimum burned to the sink account;
    /// - otherwise the minimum-ratio rule
    ///   `min(Δa · total / reserve_a, Δb · total / reserve_b)`, which
    ///   prevents minting excess shares from an imbalanced deposit.
    ///
    /// Settles the protocol fee to `fee_to` first when the sink is set.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInitialLiquidity`] when the genesis
    ///   deposit does not exceed the burned minimum.
    /// - [`AmmError::InsufficientLiquidityMinted`] when the deposit
    ///   rounds down to zero shares.
    /// - [`AmmError::ReentrantCall`] while another operation holds the
    ///   guard.
    pub fn mint(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        to: AccountId,
        fee_to: Option<AccountId>,
        now: Timestamp,
    ) -> Result<Amount> {
        self.guarded(bank, |pair, bank| {
            let (asset_a, asset_b) = (pair.key.asset_a(), pair.key.asset_b());
            let balance_a = bank.balance_of(&asset_a, &pair.account)?;
            let balance_b = bank.balance_of(&asset_b, &pair.account)?;
            let amount_a = balance_a
                .checked_sub(&pair.reserve_a)
                .ok_or(AmmError::Underflow("first-asset balance below reserve"))?;
            let amount_b = balance_b
                .checked_sub(&pair.reserve_b)
                .ok_or(AmmError::Underflow("second-asset balance below reserve"))?;

            pair.settle_protocol_fee(fee_to)?;

            let total = pair.shares.total_supply();
            let minted = if total.is_zero() {
                let product = amount_a
                    .checked_mul(&amount_b)
                    .ok_or(AmmError::Overflow("genesis deposit product"))?;
                let root = Amount::new(wide::isqrt(product.get()));
                let minted = root
                    .checked_sub(&MINIMUM_LIQUIDITY)
                    .filter(|m| !m.is_zero())
                    .ok_or(AmmError::InsufficientInitialLiquidity)?;
                pair.shares.mint(AccountId::zero(), MINIMUM_LIQUIDITY)?;
                minted
            } else {
                let by_a =
                    wide::mul_div(amount_a.get(), total.get(), pair.reserve_a.get(), Rounding::Down)
                        .ok_or(AmmError::Overflow("share issuance by first asset"))?;
                let by_b =
                    wide::mul_div(amount_b.get(), total.get(), pair.reserve_b.get(), Rounding::Down)
                        .ok_or(AmmError::Overflow("share issuance by second asset"))?;
                let minted = Amount::new(by_a.min(by_b));
                if minted.is_zero() {
                    return Err(AmmError::InsufficientLiquidityMinted);
                }
                minted
            };

            pair.shares.mint(to, minted)?;
            pair.update(balance_a, balance_b, now);
            if fee_to.is_some() {
                pair.k_last = pair
                    .reserve_a
                    .checked_mul(&pair.reserve_b)
                    .ok_or(AmmError::Overflow("reserve product"))?;
            }
            debug!(
                "pair {}: mint {minted} shares to {to} for deposit ({amount_a}, {amount_b})",
                pair.account
            );
            pair.events.push(PairEvent::Mint {
                sender: caller,
                amount_a,
                amount_b,
            });
            Ok(minted)
        })
    }

    /// Redeems the shares currently custodied by the pool itself for a
    /// pro-rata slice of both *live* balances.
    ///
    /// The caller must transfer shares into the pool's custody within the
    /// same atomic operation; using live balances (not cached reserves)
    /// means any surplus directly sent to the pool is also distributed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout
    ///   rounds to zero.
    /// - [`AmmError::ReentrantCall`] while another operation holds the
    ///   guard.
    pub fn burn(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        to: AccountId,
        fee_to: Option<AccountId>,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        self.guarded(bank, |pair, bank| {
            let (asset_a, asset_b) = (pair.key.asset_a(), pair.key.asset_b());
            let balance_a = bank.balance_of(&asset_a, &pair.account)?;
            let balance_b = bank.balance_of(&asset_b, &pair.account)?;
            let liquidity = pair.shares.balance_of(&pair.account);

            pair.settle_protocol_fee(fee_to)?;

            let total = pair.shares.total_supply();
            if total.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }
            let amount_a = Amount::new(
                wide::mul_div(liquidity.get(), balance_a.get(), total.get(), Rounding::Down)
                    .ok_or(AmmError::Overflow("first-asset redemption"))?,
            );
            let amount_b = Amount::new(
                wide::mul_div(liquidity.get(), balance_b.get(), total.get(), Rounding::Down)
                    .ok_or(AmmError::Overflow("second-asset redemption"))?,
            );
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }

            pair.shares.burn(pair.account, liquidity)?;
            bank.transfer(&asset_a, pair.account, to, amount_a)?;
            bank.transfer(&asset_b, pair.account, to, amount_b)?;

            let balance_a = bank.balance_of(&asset_a, &pair.account)?;
            let balance_b = bank.balance_of(&asset_b, &pair.account)?;
            pair.update(balance_a, balance_b, now);
            if fee_to.is_some() {
                pair.k_last = pair
                    .reserve_a
                    .checked_mul(&pair.reserve_b)
                    .ok_or(AmmError::Overflow("reserve product"))?;
            }
            debug!(
                "pair {}: burn {liquidity} shares for ({amount_a}, {amount_b}) to {to}",
                pair.account
            );
            pair.events.push(PairEvent::Burn {
                sender: caller,
                amount_a,
                amount_b,
                to,
            });
            Ok((amount_a, amount_b))
        })
    }

    /// Swaps against the reserves: transfers the requested outputs to
    /// `to` first, runs the optional flash borrower, then derives the
    /// implied inputs from the live balances and enforces the
    /// fee-adjusted product check.
    ///
    /// Exactly one output is nonzero in the common case; both may be
    /// nonzero for flash-swap flows.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] if an output reaches the
    ///   reserve.
    /// - [`AmmError::InsufficientInputAmount`] if nothing was paid in.
    /// - [`AmmError::ConstantProductViolation`] if the fee-adjusted
    ///   product would shrink.
    /// - [`AmmError::ReentrantCall`] while another operation holds the
    ///   guard.
    #[allow(clippy::too_many_arguments)]
    pub fn swap(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        amount_a_out: Amount,
        amount_b_out: Amount,
        to: AccountId,
        borrower: Option<&mut dyn FlashBorrower>,
        now: Timestamp,
    ) -> Result<()> {
        self.guarded(bank, move |pair, bank| {
            if amount_a_out.is_zero() && amount_b_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount);
            }
            let (reserve_a, reserve_b) = (pair.reserve_a, pair.reserve_b);
            if amount_a_out >= reserve_a || amount_b_out >= reserve_b {
                return Err(AmmError::InsufficientLiquidity);
            }

            let (asset_a, asset_b) = (pair.key.asset_a(), pair.key.asset_b());

            // Optimistic transfer: outputs leave before any input is seen.
            if !amount_a_out.is_zero() {
                bank.transfer(&asset_a, pair.account, to, amount_a_out)?;
            }
            if !amount_b_out.is_zero() {
                bank.transfer(&asset_b, pair.account, to, amount_b_out)?;
            }
            if let Some(cb) = borrower {
                cb.on_flash_swap(pair, bank, caller, amount_a_out, amount_b_out)?;
            }

            let balance_a = bank.balance_of(&asset_a, &pair.account)?;
            let balance_b = bank.balance_of(&asset_b, &pair.account)?;
            let owed_a = reserve_a
                .checked_sub(&amount_a_out)
                .ok_or(AmmError::Underflow("reserve minus output"))?;
            let owed_b = reserve_b
                .checked_sub(&amount_b_out)
                .ok_or(AmmError::Underflow("reserve minus output"))?;
            let amount_a_in = balance_a.saturating_sub(&owed_a);
            let amount_b_in = balance_b.saturating_sub(&owed_b);
            if amount_a_in.is_zero() && amount_b_in.is_zero() {
                return Err(AmmError::InsufficientInputAmount);
            }

            // Fee-adjusted product check at scale 1000: the input side is
            // charged 3/1000 before the products are compared.
            let adjusted_a = pair.fee_adjusted(balance_a, amount_a_in)?;
            let adjusted_b = pair.fee_adjusted(balance_b, amount_b_in)?;
            let lhs = Wide::product(adjusted_a.get(), adjusted_b.get());
            let rhs = Wide::product(reserve_a.get(), reserve_b.get())
                .checked_scale(FEE_DENOMINATOR * FEE_DENOMINATOR)
                .ok_or(AmmError::Overflow("scaled reserve product"))?;
            if lhs < rhs {
                return Err(AmmError::ConstantProductViolation);
            }

            pair.update(balance_a, balance_b, now);
            debug!(
                "pair {}: swap in ({amount_a_in}, {amount_b_in}) out ({amount_a_out}, {amount_b_out}) to {to}",
                pair.account
            );
            pair.events.push(PairEvent::Swap {
                sender: caller,
                amount_a_in,
                amount_b_in,
                amount_a_out,
                amount_b_out,
                to,
            });
            Ok(())
        })
    }

    /// Forces the cached reserves to match the live balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::ReentrantCall`] while another operation holds the
    /// guard, or a custody failure reading balances.
    pub fn sync(&mut self, bank: &mut Bank, now: Timestamp) -> Result<()> {
        self.guarded(bank, |pair, bank| {
            let balance_a = bank.balance_of(&pair.key.asset_a(), &pair.account)?;
            let balance_b = bank.balance_of(&pair.key.asset_b(), &pair.account)?;
            pair.update(balance_a, balance_b, now);
            Ok(())
        })
    }

    /// Transfers any balance in excess of the cached reserves to `to`.
    ///
    /// The counterpart of [`sync`](Self::sync): recovers surplus sent
    /// directly to the pool without moving the reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::ReentrantCall`] while another operation holds the
    /// guard, or a custody failure.
    pub fn skim(&mut self, bank: &mut Bank, to: AccountId) -> Result<()> {
        self.guarded(bank, |pair, bank| {
            let (asset_a, asset_b) = (pair.key.asset_a(), pair.key.asset_b());
            let balance_a = bank.balance_of(&asset_a, &pair.account)?;
            let balance_b = bank.balance_of(&asset_b, &pair.account)?;
            let excess_a = balance_a.saturating_sub(&pair.reserve_a);
            let excess_b = balance_b.saturating_sub(&pair.reserve_b);
            if !excess_a.is_zero() {
                bank.transfer(&asset_a, pair.account, to, excess_a)?;
            }
            if !excess_b.is_zero() {
                bank.transfer(&asset_b, pair.account, to, excess_b)?;
            }
            Ok(())
        })
    }

    // -- internals -----------------------------------------------------------

    /// Runs `op` with the reentrancy guard held and full rollback on
    /// error.
    ///
    /// The snapshot is taken with the guard still clear, so restoring it
    /// also releases the guard.
    fn guarded<T>(
        &mut self,
        bank: &mut Bank,
        op: impl FnOnce(&mut Self, &mut Bank) -> Result<T>,
    ) -> Result<T> {
        if self.locked {
            return Err(AmmError::ReentrantCall);
        }
        let pair_checkpoint = self.clone();
        let bank_checkpoint = bank.clone();
        self.locked = true;
        match op(self, bank) {
            Ok(value) => {
                self.locked = false;
                Ok(value)
            }
            Err(err) => {
                *self = pair_checkpoint;
                *bank = bank_checkpoint;
                Err(err)
            }
        }
    }

    /// `balance · 1000 − amount_in · 3`, the input side of the product
    /// check.
    fn fee_adjusted(&self, balance: Amount, amount_in: Amount) -> Result<Amount> {
        let scaled = balance
            .checked_mul(&Amount::new(FEE_DENOMINATOR))
            .ok_or(AmmError::Overflow("scaled balance"))?;
        let fee = amount_in
            .checked_mul(&Amount::new(FEE_DENOMINATOR - FEE_NUMERATOR))
            .ok_or(AmmError::Overflow("scaled input fee"))?;
        scaled
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("fee-adjusted balance"))
    }

    /// Accumulates time-weighted prices against the *old* reserves, then
    /// commits the new ones.
    ///
    /// Accumulators use wrapping Q64.64 arithmetic; consumers difference
    /// two observations, so wrap-around cancels out.
    fn update(&mut self, balance_a: Amount, balance_b: Amount, now: Timestamp) {
        let elapsed = u128::from(now.seconds_since(self.last_update));
        if elapsed > 0 && !self.reserve_a.is_zero() && !self.reserve_b.is_zero() {
            let price_a = wide::fraction_q64(self.reserve_b.get(), self.reserve_a.get());
            let price_b = wide::fraction_q64(self.reserve_a.get(), self.reserve_b.get());
            self.price_a_cumulative = self
                .price_a_cumulative
                .wrapping_add(price_a.wrapping_mul(elapsed));
            self.price_b_cumulative = self
                .price_b_cumulative
                .wrapping_add(price_b.wrapping_mul(elapsed));
        }
        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        self.last_update = now;
        self.events.push(PairEvent::Sync {
            reserve_a: balance_a,
            reserve_b: balance_b,
            at: now,
        });
    }

    /// Mints the fee sink's share of invariant growth since the last
    /// settlement: `total · (√k − √k_last) / (5·√k + √k_last)`, one sixth
    /// of the growth. Clears `k_last` while the sink is unset.
    fn settle_protocol_fee(&mut self, fee_to: Option<AccountId>) -> Result<()> {
        let Some(sink) = fee_to else {
            self.k_last = Amount::ZERO;
            return Ok(());
        };
        if self.k_last.is_zero() {
            return Ok(());
        }
        let k = self
            .reserve_a
            .checked_mul(&self.reserve_b)
            .ok_or(AmmError::Overflow("reserve product"))?;
        let root_k = wide::isqrt(k.get());
        let root_k_last = wide::isqrt(self.k_last.get());
        if root_k > root_k_last {
            let growth = root_k - root_k_last;
            // root_k < 2^64, so the denominator fits comfortably.
            let denominator = root_k * 5 + root_k_last;
            let minted = wide::mul_div(
                self.shares.total_supply().get(),
                growth,
                denominator,
                Rounding::Down,
            )
            .ok_or(AmmError::Overflow("protocol fee shares"))?;
            if minted > 0 {
                self.shares.mint(sink, Amount::new(minted))?;
            }
        }
        Ok(())
    }
}
