//! Balance and allowance books for one fungible asset.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount, LedgerEvent};
use crate::error::{AmmError, Result};

/// One fungible asset's books: total supply, per-account balances, and
/// spender allowances.
///
/// The same type backs both ordinary assets (inside the
/// [`Bank`](super::Bank)) and a pool's LP shares (inside
/// [`Pair`](crate::pair::Pair)) — shares are fungible, transferable, and
/// approvable exactly like any other balance.
///
/// Mint and burn are crate-internal: supply changes only through asset
/// registration and pool share issuance. Both record a `Transfer` with
/// [`AccountId::zero`] as the counterparty.
///
/// The sum of all balances equals `total_supply` at all times; every
/// mutation moves value between accounts or between an account and the
/// supply, never creating or losing units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    total_supply: Amount,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Creates an empty ledger with zero supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total issued units.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance held by `holder`; zero for unknown accounts.
    #[must_use]
    pub fn balance_of(&self, holder: &AccountId) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    /// Remaining allowance granted by `owner` to `spender`.
    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Observable log of transfers and approvals, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// Zero-amount transfers succeed and still emit a record.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `amount`.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.debit(&from, amount)?;
        self.credit(&to, amount)?;
        self.events.push(LedgerEvent::Transfer { from, to, amount });
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s balance, replacing any
    /// prior value.
    ///
    /// An allowance of [`Amount::MAX`] is unlimited and is never
    /// decremented by [`transfer_from`](Self::transfer_from).
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
        self.events.push(LedgerEvent::Approval {
            owner,
            spender,
            amount,
        });
    }

    /// Moves `amount` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if `spender`'s allowance is
    ///   below `amount`.
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(&from, &spender);
        if allowed != Amount::MAX {
            let remaining = allowed
                .checked_sub(&amount)
                .ok_or(AmmError::InsufficientAllowance)?;
            self.allowances.insert((from, spender), remaining);
        }
        self.transfer(from, to, amount)
    }

    /// Issues `amount` new units to `to`.
    pub(crate) fn mint(&mut self, to: AccountId, amount: Amount) -> Result<()> {
        self.total_supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("total supply"))?;
        self.credit(&to, amount)?;
        self.events.push(LedgerEvent::Transfer {
            from: AccountId::zero(),
            to,
            amount,
        });
        Ok(())
    }

    /// Destroys `amount` units held by `from`.
    pub(crate) fn burn(&mut self, from: AccountId, amount: Amount) -> Result<()> {
        self.debit(&from, amount)?;
        self.total_supply = self
            .total_supply
            .checked_sub(&amount)
            .ok_or(AmmError::Underflow("total supply"))?;
        self.events.push(LedgerEvent::Transfer {
            from,
            to: AccountId::zero(),
            amount,
        });
        Ok(())
    }

    fn debit(&mut self, account: &AccountId, amount: Amount) -> Result<()> {
        let remaining = self
            .balance_of(account)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert(*account, remaining);
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: Amount) -> Result<()> {
        // Balances are bounded by total supply, itself checked, so this
        // addition can only fail through a supply-accounting bug.
        let raised = self
            .balance_of(account)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("account balance"))?;
        self.balances.insert(*account, raised);
        Ok(())
    }
}
