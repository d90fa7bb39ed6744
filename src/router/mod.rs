//! Multi-step orchestration over the registry and pools.
//!
//! The [`Router`] composes pool primitives into deadline-bounded,
//! slippage-protected user actions: add/remove liquidity and multi-hop
//! exact-in / exact-out swaps. It holds references to the registry and
//! the bank for its lifetime — never copies — and carries no state of its
//! own beyond its spender account.
//!
//! Every entry point checks the caller's deadline first, then runs inside
//! a transactional wrapper: if any sub-step fails, the registry and the
//! bank are restored wholesale, so a half-executed multi-hop trade leaves
//! no trace.
//!
//! Hop amounts are projected ahead of time from cached reserves
//! ([`quote`]); under correct bookkeeping each pool's own invariant check
//! then passes exactly. A divergence (a reentrant or fee-mismatched pool)
//! fails that hop's check and aborts the whole operation atomically.

use log::debug;

use crate::domain::{AccountId, Amount, AssetId, Timestamp};
use crate::error::{AmmError, Result};
use crate::factory::{Factory, PairId};
use crate::token::Bank;

pub mod quote;

/// Parameters for [`Router::add_liquidity`].
///
/// Asset orientation is the caller's: `asset_a` here need not be the
/// pool's canonical first asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    /// First asset, in the caller's orientation.
    pub asset_a: AssetId,
    /// Second asset, in the caller's orientation.
    pub asset_b: AssetId,
    /// Preferred deposit of `asset_a`; the upper bound.
    pub amount_a_desired: Amount,
    /// Preferred deposit of `asset_b`; the upper bound.
    pub amount_b_desired: Amount,
    /// Slippage floor for the matched `asset_a` deposit.
    pub amount_a_min: Amount,
    /// Slippage floor for the matched `asset_b` deposit.
    pub amount_b_min: Amount,
    /// Recipient of the minted shares.
    pub to: AccountId,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

/// Parameters for [`Router::remove_liquidity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidity {
    /// First asset, in the caller's orientation.
    pub asset_a: AssetId,
    /// Second asset, in the caller's orientation.
    pub asset_b: AssetId,
    /// Shares to redeem.
    pub shares: Amount,
    /// Slippage floor for the `asset_a` payout.
    pub amount_a_min: Amount,
    /// Slippage floor for the `asset_b` payout.
    pub amount_b_min: Amount,
    /// Recipient of both payouts.
    pub to: AccountId,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

/// Parameters for [`Router::swap_exact_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    /// Exact input spent from the caller.
    pub amount_in: Amount,
    /// Slippage floor for the final output.
    pub amount_out_min: Amount,
    /// Chain of assets to traverse, first = input, last = output.
    pub path: Vec<AssetId>,
    /// Recipient of the final output.
    pub to: AccountId,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

/// Parameters for [`Router::swap_exact_out`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOut {
    /// Exact output delivered to the recipient.
    pub amount_out: Amount,
    /// Cap on the input pulled from the caller.
    pub amount_in_max: Amount,
    /// Chain of assets to traverse, first = input, last = output.
    pub path: Vec<AssetId>,
    /// Recipient of the final output.
    pub to: AccountId,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

/// Stateless orchestrator over an injected registry and bank.
///
/// The router pulls caller funds through allowances granted to its own
/// `account`, mirroring the approve-then-call flow of the underlying
/// ledgers.
#[derive(Debug)]
pub struct Router<'a> {
    factory: &'a mut Factory,
    bank: &'a mut Bank,
    account: AccountId,
}

impl<'a> Router<'a> {
    /// Borrows the registry and bank for this router's lifetime.
    pub fn new(factory: &'a mut Factory, bank: &'a mut Bank, account: AccountId) -> Self {
        Self {
            factory,
            bank,
            account,
        }
    }

    /// The spender identity callers must approve.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Deposits a ratio-matched amount of both assets and mints shares to
    /// `params.to`. Creates the pool on first use.
    ///
    /// With existing reserves, one desired amount is scaled down to
    /// preserve the reserve ratio; whichever orientation keeps both
    /// deposits within their desired caps is chosen.
    ///
    /// Returns `(amount_a, amount_b, shares)` in the caller's
    /// orientation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   when the matched amount falls below its floor.
    /// - Pool-creation and custody failures, all rolled back atomically.
    pub fn add_liquidity(
        &mut self,
        caller: AccountId,
        params: AddLiquidity,
        now: Timestamp,
    ) -> Result<(Amount, Amount, Amount)> {
        ensure_live(params.deadline, now)?;
        self.transactional(|router| {
            let pair_id = match router.factory.get_pair(&params.asset_a, &params.asset_b) {
                Some(id) => id,
                None => router
                    .factory
                    .create_pair(params.asset_a, params.asset_b, now)?,
            };
            let (amount_a, amount_b) = router.matched_deposit(pair_id, &params)?;
            let pair_account = router.factory.pair(pair_id)?.account();
            router.bank.transfer_from(
                &params.asset_a,
                router.account,
                caller,
                pair_account,
                amount_a,
            )?;
            router.bank.transfer_from(
                &params.asset_b,
                router.account,
                caller,
                pair_account,
                amount_b,
            )?;
            let fee_to = router.factory.fee_to();
            let shares = router
                .factory
                .pair_mut(pair_id)?
                .mint(router.bank, caller, params.to, fee_to, now)?;
            debug!("add_liquidity: ({amount_a}, {amount_b}) -> {shares} shares");
            Ok((amount_a, amount_b, shares))
        })
    }

    /// Redeems `params.shares` for both assets, enforcing the payout
    /// floors.
    ///
    /// Returns `(amount_a, amount_b)` in the caller's orientation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::UnknownPair`] if no pool exists.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   when a payout falls below its floor; everything rolls back.
    pub fn remove_liquidity(
        &mut self,
        caller: AccountId,
        params: RemoveLiquidity,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        ensure_live(params.deadline, now)?;
        self.transactional(|router| {
            let pair_id = router
                .factory
                .get_pair(&params.asset_a, &params.asset_b)
                .ok_or(AmmError::UnknownPair)?;
            let fee_to = router.factory.fee_to();
            let spender = router.account;
            let pair = router.factory.pair_mut(pair_id)?;
            let pair_account = pair.account();
            pair.transfer_shares_from(spender, caller, pair_account, params.shares)?;
            let (canonical_a, canonical_b) =
                pair.burn(router.bank, caller, params.to, fee_to, now)?;
            let (amount_a, amount_b) = if params.asset_a == pair.key().asset_a() {
                (canonical_a, canonical_b)
            } else {
                (canonical_b, canonical_a)
            };
            if amount_a < params.amount_a_min {
                return Err(AmmError::InsufficientAAmount);
            }
            if amount_b < params.amount_b_min {
                return Err(AmmError::InsufficientBAmount);
            }
            debug!("remove_liquidity: {} shares -> ({amount_a}, {amount_b})", params.shares);
            Ok((amount_a, amount_b))
        })
    }

    /// Spends exactly `params.amount_in` along the path, delivering at
    /// least `params.amount_out_min` of the final asset to `params.to`.
    ///
    /// The full output chain is projected from cached reserves before any
    /// token moves; each hop's output is then routed directly into the
    /// next pool's custody.
    ///
    /// Returns the projected amounts, one per path position.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InvalidPath`] / [`AmmError::UnknownPair`] for a bad
    ///   path.
    /// - [`AmmError::InsufficientOutputAmount`] if the projection misses
    ///   the floor.
    /// - Any hop failure, with every prior hop rolled back.
    pub fn swap_exact_in(
        &mut self,
        caller: AccountId,
        params: SwapExactIn,
        now: Timestamp,
    ) -> Result<Vec<Amount>> {
        ensure_live(params.deadline, now)?;
        self.transactional(|router| {
            let amounts = quote::amounts_out(router.factory, params.amount_in, &params.path)?;
            let Some(final_out) = amounts.last() else {
                return Err(AmmError::InvalidPath);
            };
            if *final_out < params.amount_out_min {
                return Err(AmmError::InsufficientOutputAmount);
            }
            router.execute_hops(caller, &params.path, &amounts, params.to, now)?;
            Ok(amounts)
        })
    }

    /// Delivers exactly `params.amount_out` of the final asset, spending
    /// at most `params.amount_in_max` of the first.
    ///
    /// Returns the projected amounts, one per path position.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::ExcessiveInputAmount`] if the required first-hop
    ///   input exceeds the cap.
    /// - As [`swap_exact_in`](Self::swap_exact_in) otherwise.
    pub fn swap_exact_out(
        &mut self,
        caller: AccountId,
        params: SwapExactOut,
        now: Timestamp,
    ) -> Result<Vec<Amount>> {
        ensure_live(params.deadline, now)?;
        self.transactional(|router| {
            let amounts = quote::amounts_in(router.factory, params.amount_out, &params.path)?;
            if amounts[0] > params.amount_in_max {
                return Err(AmmError::ExcessiveInputAmount);
            }
            router.execute_hops(caller, &params.path, &amounts, params.to, now)?;
            Ok(amounts)
        })
    }

    // -- internals -----------------------------------------------------------

    /// Pulls `amounts[0]` from the caller into the first pool, then swaps
    /// hop by hop, each output landing directly in the next pool's
    /// custody (or with the recipient on the final hop).
    fn execute_hops(
        &mut self,
        caller: AccountId,
        path: &[AssetId],
        amounts: &[Amount],
        to: AccountId,
        now: Timestamp,
    ) -> Result<()> {
        let first_id = self
            .factory
            .get_pair(&path[0], &path[1])
            .ok_or(AmmError::UnknownPair)?;
        let first_account = self.factory.pair(first_id)?.account();
        self.bank
            .transfer_from(&path[0], self.account, caller, first_account, amounts[0])?;

        for (i, hop) in path.windows(2).enumerate() {
            let pair_id = self
                .factory
                .get_pair(&hop[0], &hop[1])
                .ok_or(AmmError::UnknownPair)?;
            let recipient = if i == path.len() - 2 {
                to
            } else {
                let next_id = self
                    .factory
                    .get_pair(&path[i + 1], &path[i + 2])
                    .ok_or(AmmError::UnknownPair)?;
                self.factory.pair(next_id)?.account()
            };
            let out = amounts[i + 1];
            let pair = self.factory.pair_mut(pair_id)?;
            let (amount_a_out, amount_b_out) = if hop[1] == pair.key().asset_a() {
                (out, Amount::ZERO)
            } else {
                (Amount::ZERO, out)
            };
            pair.swap(
                self.bank,
                caller,
                amount_a_out,
                amount_b_out,
                recipient,
                None,
                now,
            )?;
        }
        Ok(())
    }

    /// Ratio-matched deposit amounts in the caller's orientation.
    fn matched_deposit(
        &self,
        pair_id: PairId,
        params: &AddLiquidity,
    ) -> Result<(Amount, Amount)> {
        let pair = self.factory.pair(pair_id)?;
        let (canonical_a, canonical_b, _) = pair.reserves();
        let (reserve_a, reserve_b) = if params.asset_a == pair.key().asset_a() {
            (canonical_a, canonical_b)
        } else {
            (canonical_b, canonical_a)
        };
        if reserve_a.is_zero() && reserve_b.is_zero() {
            return Ok((params.amount_a_desired, params.amount_b_desired));
        }
        let b_optimal = quote::quote(params.amount_a_desired, reserve_a, reserve_b)?;
        if b_optimal <= params.amount_b_desired {
            if b_optimal < params.amount_b_min {
                return Err(AmmError::InsufficientBAmount);
            }
            Ok((params.amount_a_desired, b_optimal))
        } else {
            let a_optimal = quote::quote(params.amount_b_desired, reserve_b, reserve_a)?;
            debug_assert!(a_optimal <= params.amount_a_desired);
            if a_optimal < params.amount_a_min {
                return Err(AmmError::InsufficientAAmount);
            }
            Ok((a_optimal, params.amount_b_desired))
        }
    }

    /// Runs `op` with all-or-nothing semantics over the registry and the
    /// bank.
    fn transactional<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let factory_checkpoint = self.factory.clone();
        let bank_checkpoint = self.bank.clone();
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                *self.factory = factory_checkpoint;
                *self.bank = bank_checkpoint;
                Err(err)
            }
        }
    }
}

fn ensure_live(deadline: Timestamp, now: Timestamp) -> Result<()> {
    if now.is_after(deadline) {
        return Err(AmmError::Expired);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;
    use crate::pair::MINIMUM_LIQUIDITY;
    use crate::token::TokenInfo;

    // -- helpers --------------------------------------------------------------

    fn asset(byte: u8) -> AssetId {
        AssetId::from_bytes([byte; 32])
    }

    fn acct(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn alice() -> AccountId {
        acct(0x11)
    }

    fn bob() -> AccountId {
        acct(0x22)
    }

    fn router_account() -> AccountId {
        acct(0x99)
    }

    fn t(seconds: u64) -> Timestamp {
        Timestamp::new(seconds)
    }

    fn far_deadline() -> Timestamp {
        Timestamp::new(1_000_000)
    }

    /// Bank with three assets funded to alice and bob, all pre-approved
    /// for the router, plus an empty factory.
    fn world() -> (Factory, Bank) {
        let mut bank = Bank::new();
        for (id, symbol) in [(asset(1), "TKA"), (asset(2), "TKB"), (asset(3), "TKC")] {
            let Ok(()) = bank.create_asset(
                id,
                TokenInfo::new(format!("Token {symbol}"), symbol, Decimals::EIGHTEEN),
                alice(),
                Amount::new(10_000_000_000),
            ) else {
                panic!("create_asset in fixture");
            };
            let Ok(()) = bank.transfer(&id, alice(), bob(), Amount::new(1_000_000_000)) else {
                panic!("funding bob");
            };
            for owner in [alice(), bob()] {
                let Ok(()) = bank.approve(&id, owner, router_account(), Amount::MAX) else {
                    panic!("approval in fixture");
                };
            }
        }
        (Factory::new(acct(0xF0)), bank)
    }

    fn add_liquidity_params(a: u128, b: u128) -> AddLiquidity {
        AddLiquidity {
            asset_a: asset(1),
            asset_b: asset(2),
            amount_a_desired: Amount::new(a),
            amount_b_desired: Amount::new(b),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice(),
            deadline: far_deadline(),
        }
    }

    /// Seeds the (1, 2) pool with 1M/1M from alice.
    fn seeded_world() -> (Factory, Bank) {
        let (mut factory, mut bank) = world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let Ok(_) = router.add_liquidity(alice(), add_liquidity_params(1_000_000, 1_000_000), t(0))
        else {
            panic!("seed add_liquidity");
        };
        (factory, bank)
    }

    // -- add_liquidity --------------------------------------------------------

    #[test]
    fn add_liquidity_creates_pool_and_mints() {
        let (mut factory, mut bank) = world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let Ok((amount_a, amount_b, shares)) =
            router.add_liquidity(alice(), add_liquidity_params(1_000_000, 1_000_000), t(0))
        else {
            panic!("expected Ok");
        };
        assert_eq!(amount_a, Amount::new(1_000_000));
        assert_eq!(amount_b, Amount::new(1_000_000));
        assert_eq!(shares, Amount::new(999_000));
        assert_eq!(factory.all_pairs_len(), 1);
    }

    #[test]
    fn add_liquidity_matches_existing_ratio() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        // Pool is 1:1; offering 200k/100k matches down the A side.
        let Ok((amount_a, amount_b, _)) =
            router.add_liquidity(bob(), add_liquidity_params(200_000, 100_000), t(1))
        else {
            panic!("expected Ok");
        };
        assert_eq!(amount_a, Amount::new(100_000));
        assert_eq!(amount_b, Amount::new(100_000));
    }

    #[test]
    fn add_liquidity_slippage_floor_aborts_cleanly() {
        let (mut factory, mut bank) = seeded_world();
        let bob_a_before = bank.balance_of(&asset(1), &bob());
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let mut params = add_liquidity_params(200_000, 100_000);
        // The matched A amount will be 100_000 — demand more.
        params.amount_a_min = Amount::new(150_000);
        assert_eq!(
            router.add_liquidity(bob(), params, t(1)),
            Err(AmmError::InsufficientAAmount)
        );
        // Reserves and caller balances unchanged.
        let Some(id) = factory.get_pair(&asset(1), &asset(2)) else {
            panic!("pool exists");
        };
        let Ok(pair) = factory.pair(id) else {
            panic!("pool exists");
        };
        let (ra, rb, _) = pair.reserves();
        assert_eq!((ra, rb), (Amount::new(1_000_000), Amount::new(1_000_000)));
        assert_eq!(bank.balance_of(&asset(1), &bob()), bob_a_before);
    }

    #[test]
    fn add_liquidity_b_floor() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let mut params = add_liquidity_params(100_000, 200_000);
        // Matched B amount will be 100_000 — demand more.
        params.amount_b_min = Amount::new(150_000);
        assert_eq!(
            router.add_liquidity(bob(), params, t(1)),
            Err(AmmError::InsufficientBAmount)
        );
    }

    #[test]
    fn add_liquidity_expired() {
        let (mut factory, mut bank) = world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let mut params = add_liquidity_params(1, 1);
        params.deadline = t(10);
        assert_eq!(
            router.add_liquidity(alice(), params, t(11)),
            Err(AmmError::Expired)
        );
        assert_eq!(factory.all_pairs_len(), 0);
    }

    #[test]
    fn add_liquidity_reversed_orientation() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        // Same pool addressed as (2, 1).
        let params = AddLiquidity {
            asset_a: asset(2),
            asset_b: asset(1),
            amount_a_desired: Amount::new(50_000),
            amount_b_desired: Amount::new(50_000),
            amount_a_min: Amount::new(50_000),
            amount_b_min: Amount::new(50_000),
            to: bob(),
            deadline: far_deadline(),
        };
        let Ok((amount_a, amount_b, shares)) = router.add_liquidity(bob(), params, t(1)) else {
            panic!("expected Ok");
        };
        assert_eq!((amount_a, amount_b), (Amount::new(50_000), Amount::new(50_000)));
        assert_eq!(shares, Amount::new(50_000));
        assert_eq!(factory.all_pairs_len(), 1);
    }

    // -- remove_liquidity -----------------------------------------------------

    #[test]
    fn remove_liquidity_round_trip() {
        let (mut factory, mut bank) = seeded_world();
        // Alice approves the router for her shares first.
        let Some(id) = factory.get_pair(&asset(1), &asset(2)) else {
            panic!("pool exists");
        };
        let Ok(pair) = factory.pair_mut(id) else {
            panic!("pool exists");
        };
        pair.approve_shares(alice(), router_account(), Amount::MAX);

        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = RemoveLiquidity {
            asset_a: asset(1),
            asset_b: asset(2),
            shares: Amount::new(999_000),
            amount_a_min: Amount::new(998_000),
            amount_b_min: Amount::new(998_000),
            to: alice(),
            deadline: far_deadline(),
        };
        let Ok((amount_a, amount_b)) = router.remove_liquidity(alice(), params, t(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(amount_a, Amount::new(999_000));
        assert_eq!(amount_b, Amount::new(999_000));
        let Ok(pair) = factory.pair(id) else {
            panic!("pool exists");
        };
        assert_eq!(pair.total_shares(), MINIMUM_LIQUIDITY);
    }

    #[test]
    fn remove_liquidity_floor_aborts() {
        let (mut factory, mut bank) = seeded_world();
        let Some(id) = factory.get_pair(&asset(1), &asset(2)) else {
            panic!("pool exists");
        };
        let Ok(pair) = factory.pair_mut(id) else {
            panic!("pool exists");
        };
        pair.approve_shares(alice(), router_account(), Amount::MAX);

        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = RemoveLiquidity {
            asset_a: asset(1),
            asset_b: asset(2),
            shares: Amount::new(999_000),
            amount_a_min: Amount::new(999_001),
            amount_b_min: Amount::ZERO,
            to: alice(),
            deadline: far_deadline(),
        };
        assert_eq!(
            router.remove_liquidity(alice(), params, t(1)),
            Err(AmmError::InsufficientAAmount)
        );
        // Shares restored to alice.
        let Ok(pair) = factory.pair(id) else {
            panic!("pool exists");
        };
        assert_eq!(pair.share_balance_of(&alice()), Amount::new(999_000));
    }

    #[test]
    fn remove_liquidity_unknown_pool() {
        let (mut factory, mut bank) = world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = RemoveLiquidity {
            asset_a: asset(1),
            asset_b: asset(2),
            shares: Amount::new(1),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice(),
            deadline: far_deadline(),
        };
        assert_eq!(
            router.remove_liquidity(alice(), params, t(0)),
            Err(AmmError::UnknownPair)
        );
    }

    // -- swap_exact_in --------------------------------------------------------

    #[test]
    fn swap_exact_in_single_hop() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(100_000),
            amount_out_min: Amount::new(90_000),
            path: vec![asset(1), asset(2)],
            to: bob(),
            deadline: far_deadline(),
        };
        let Ok(amounts) = router.swap_exact_in(bob(), params, t(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![Amount::new(100_000), Amount::new(90_661)]);
        assert_eq!(
            bank.balance_of(&asset(2), &bob()),
            Ok(Amount::new(1_000_090_661))
        );
    }

    #[test]
    fn swap_exact_in_two_hops() {
        let (mut factory, mut bank) = seeded_world();
        {
            let mut router = Router::new(&mut factory, &mut bank, router_account());
            // Second pool: (2, 3) at 1M/1M.
            let params = AddLiquidity {
                asset_a: asset(2),
                asset_b: asset(3),
                amount_a_desired: Amount::new(1_000_000),
                amount_b_desired: Amount::new(1_000_000),
                amount_a_min: Amount::ZERO,
                amount_b_min: Amount::ZERO,
                to: alice(),
                deadline: far_deadline(),
            };
            let Ok(_) = router.add_liquidity(alice(), params, t(0)) else {
                panic!("second pool");
            };
        }
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(100_000),
            amount_out_min: Amount::new(80_000),
            path: vec![asset(1), asset(2), asset(3)],
            to: bob(),
            deadline: far_deadline(),
        };
        let Ok(amounts) = router.swap_exact_in(bob(), params, t(1)) else {
            panic!("expected Ok");
        };
        // Hop 1: 100_000 -> 90_661; hop 2: 90_661 -> projected from 1M/1M.
        assert_eq!(amounts[1], Amount::new(90_661));
        assert!(amounts[2] > Amount::new(82_000) && amounts[2] < Amount::new(90_661));
        assert_eq!(
            bank.balance_of(&asset(3), &bob()),
            Ok(Amount::new(1_000_000_000 + amounts[2].get()))
        );
        // The intermediate asset never touches bob.
        assert_eq!(
            bank.balance_of(&asset(2), &bob()),
            Ok(Amount::new(1_000_000_000))
        );
    }

    #[test]
    fn swap_exact_in_output_floor() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(100_000),
            amount_out_min: Amount::new(90_662),
            path: vec![asset(1), asset(2)],
            to: bob(),
            deadline: far_deadline(),
        };
        assert_eq!(
            router.swap_exact_in(bob(), params, t(1)),
            Err(AmmError::InsufficientOutputAmount)
        );
        // Nothing left bob's balance.
        assert_eq!(
            bank.balance_of(&asset(1), &bob()),
            Ok(Amount::new(1_000_000_000))
        );
    }

    #[test]
    fn swap_exact_in_through_empty_pool_rolls_back_fully() {
        let (mut factory, mut bank) = seeded_world();
        // Create the (2, 3) pool but leave it unseeded.
        let Ok(_) = factory.create_pair(asset(2), asset(3), t(0)) else {
            panic!("create_pair");
        };
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(100_000),
            amount_out_min: Amount::ZERO,
            path: vec![asset(1), asset(2), asset(3)],
            to: bob(),
            deadline: far_deadline(),
        };
        // The projection hits the empty second pool.
        assert_eq!(
            router.swap_exact_in(bob(), params, t(1)),
            Err(AmmError::InsufficientLiquidity)
        );
        // No token left bob, no reserve moved.
        assert_eq!(
            bank.balance_of(&asset(1), &bob()),
            Ok(Amount::new(1_000_000_000))
        );
        let Some(id) = factory.get_pair(&asset(1), &asset(2)) else {
            panic!("pool exists");
        };
        let Ok(pair) = factory.pair(id) else {
            panic!("pool exists");
        };
        let (ra, rb, _) = pair.reserves();
        assert_eq!((ra, rb), (Amount::new(1_000_000), Amount::new(1_000_000)));
    }

    #[test]
    fn swap_exact_in_invalid_path() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(1),
            amount_out_min: Amount::ZERO,
            path: vec![asset(1)],
            to: bob(),
            deadline: far_deadline(),
        };
        assert_eq!(
            router.swap_exact_in(bob(), params, t(1)),
            Err(AmmError::InvalidPath)
        );
    }

    #[test]
    fn swap_exact_in_expired() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactIn {
            amount_in: Amount::new(1),
            amount_out_min: Amount::ZERO,
            path: vec![asset(1), asset(2)],
            to: bob(),
            deadline: t(0),
        };
        assert_eq!(
            router.swap_exact_in(bob(), params, t(1)),
            Err(AmmError::Expired)
        );
    }

    // -- swap_exact_out -------------------------------------------------------

    #[test]
    fn swap_exact_out_single_hop() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactOut {
            amount_out: Amount::new(90_661),
            amount_in_max: Amount::new(100_000),
            path: vec![asset(1), asset(2)],
            to: bob(),
            deadline: far_deadline(),
        };
        let Ok(amounts) = router.swap_exact_out(bob(), params, t(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![Amount::new(100_000), Amount::new(90_661)]);
        assert_eq!(
            bank.balance_of(&asset(2), &bob()),
            Ok(Amount::new(1_000_090_661))
        );
    }

    #[test]
    fn swap_exact_out_input_cap() {
        let (mut factory, mut bank) = seeded_world();
        let mut router = Router::new(&mut factory, &mut bank, router_account());
        let params = SwapExactOut {
            amount_out: Amount::new(90_661),
            amount_in_max: Amount::new(99_999),
            path: vec![asset(1), asset(2)],
            to: bob(),
            deadline: far_deadline(),
        };
        assert_eq!(
            router.swap_exact_out(bob(), params, t(1)),
            Err(AmmError::ExcessiveInputAmount)
        );
        assert_eq!(
            bank.balance_of(&asset(1), &bob()),
            Ok(Amount::new(1_000_000_000))
        );
    }
}
