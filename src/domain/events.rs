//! Observable log records emitted by ledgers, pools, and the registry.
//!
//! Events are journal entries, not state: operations append them on
//! success, and a failed operation leaves no record (the journal is part
//! of the snapshot every guarded operation restores on error).

use super::{AccountId, Amount, AssetId, Timestamp};

/// Log record emitted by a fungible [`Ledger`](crate::token::Ledger).
///
/// Mint and burn use [`AccountId::zero`] as the counterparty, so a plain
/// balance transfer, a mint, and a burn all appear as `Transfer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Balance moved between accounts.
    Transfer {
        /// Source account (the sink account for mints).
        from: AccountId,
        /// Destination account (the sink account for burns).
        to: AccountId,
        /// Quantity moved.
        amount: Amount,
    },
    /// A spender allowance was set.
    Approval {
        /// Balance owner granting the allowance.
        owner: AccountId,
        /// Account allowed to spend.
        spender: AccountId,
        /// Allowance granted (replaces any prior value).
        amount: Amount,
    },
}

/// Log record emitted by a [`Pair`](crate::pair::Pair) pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairEvent {
    /// Liquidity deposited and shares issued.
    Mint {
        /// Caller that invoked the mint.
        sender: AccountId,
        /// First-asset quantity absorbed into reserves.
        amount_a: Amount,
        /// Second-asset quantity absorbed into reserves.
        amount_b: Amount,
    },
    /// Shares redeemed and reserves paid out.
    Burn {
        /// Caller that invoked the burn.
        sender: AccountId,
        /// First-asset quantity paid out.
        amount_a: Amount,
        /// Second-asset quantity paid out.
        amount_b: Amount,
        /// Recipient of both payouts.
        to: AccountId,
    },
    /// A swap settled against the reserves.
    Swap {
        /// Caller that invoked the swap.
        sender: AccountId,
        /// Implied first-asset input.
        amount_a_in: Amount,
        /// Implied second-asset input.
        amount_b_in: Amount,
        /// First-asset output transferred.
        amount_a_out: Amount,
        /// Second-asset output transferred.
        amount_b_out: Amount,
        /// Recipient of the outputs.
        to: AccountId,
    },
    /// Cached reserves were resynchronized to live balances.
    Sync {
        /// New first-asset reserve.
        reserve_a: Amount,
        /// New second-asset reserve.
        reserve_b: Amount,
        /// Time of the resync.
        at: Timestamp,
    },
}

/// Log record emitted by the [`Factory`](crate::factory::Factory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryEvent {
    /// A new pool was created and indexed.
    PairCreated {
        /// Lower-ordered asset of the canonical key.
        asset_a: AssetId,
        /// Higher-ordered asset of the canonical key.
        asset_b: AssetId,
        /// The pool's content-addressed custody account.
        pair_account: AccountId,
        /// Total number of pools after this creation.
        pair_count: u64,
    },
}
