//! Registry of asset ledgers consumed by the pool and router.

use std::collections::HashMap;

use log::trace;

use crate::domain::{AccountId, Amount, AssetId, Decimals};
use crate::error::{AmmError, Result};

use super::Ledger;

/// Descriptive metadata attached to a registered asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    name: String,
    symbol: String,
    decimals: Decimals,
}

impl TokenInfo {
    /// Creates metadata for an asset.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: Decimals) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Human-readable asset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Declared decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}

/// A registered asset: metadata plus its balance ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    info: TokenInfo,
    ledger: Ledger,
}

impl Token {
    /// Asset metadata.
    #[must_use]
    pub const fn info(&self) -> &TokenInfo {
        &self.info
    }

    /// The asset's balance and allowance books.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

/// The set of all asset ledgers.
///
/// This is the token capability the engine consumes (balance query,
/// transfer, transfer-with-allowance); pools and the router never touch
/// balances except through this surface. Operations are atomic: they
/// either fully apply or leave the bank untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bank {
    tokens: HashMap<AssetId, Token>,
}

impl Bank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new asset and mints its initial supply to `treasury`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAsset`] for the reserved null identifier.
    /// - [`AmmError::AssetExists`] if `asset` is already registered.
    pub fn create_asset(
        &mut self,
        asset: AssetId,
        info: TokenInfo,
        treasury: AccountId,
        supply: Amount,
    ) -> Result<()> {
        if asset.is_zero() {
            return Err(AmmError::ZeroAsset);
        }
        if self.tokens.contains_key(&asset) {
            return Err(AmmError::AssetExists);
        }
        let mut ledger = Ledger::new();
        ledger.mint(treasury, supply)?;
        trace!("asset {asset} registered, supply {supply} to {treasury}");
        self.tokens.insert(asset, Token { info, ledger });
        Ok(())
    }

    /// Returns `true` if `asset` is registered.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.tokens.contains_key(asset)
    }

    /// Read access to a registered asset.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not registered.
    pub fn token(&self, asset: &AssetId) -> Result<&Token> {
        self.tokens.get(asset).ok_or(AmmError::UnknownAsset)
    }

    /// Balance of `holder` in `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not registered.
    pub fn balance_of(&self, asset: &AssetId, holder: &AccountId) -> Result<Amount> {
        Ok(self.token(asset)?.ledger.balance_of(holder))
    }

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::UnknownAsset`] or any [`Ledger::transfer`] failure.
    pub fn transfer(
        &mut self,
        asset: &AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        trace!("transfer {amount} of {asset}: {from} -> {to}");
        self.ledger_mut(asset)?.transfer(from, to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s balance of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not registered.
    pub fn approve(
        &mut self,
        asset: &AssetId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.ledger_mut(asset)?.approve(owner, spender, amount);
        Ok(())
    }

    /// Remaining allowance granted by `owner` to `spender` for `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not registered.
    pub fn allowance(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<Amount> {
        Ok(self.token(asset)?.ledger.allowance(owner, spender))
    }

    /// Moves `amount` of `asset` from `from` to `to` on behalf of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::UnknownAsset`] or any [`Ledger::transfer_from`]
    /// failure.
    pub fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        trace!("transfer_from {amount} of {asset}: {from} -> {to} (spender {spender})");
        self.ledger_mut(asset)?.transfer_from(spender, from, to, amount)
    }

    fn ledger_mut(&mut self, asset: &AssetId) -> Result<&mut Ledger> {
        self.tokens
            .get_mut(asset)
            .map(|t| &mut t.ledger)
            .ok_or(AmmError::UnknownAsset)
    }
}
