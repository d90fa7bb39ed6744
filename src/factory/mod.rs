//! Deterministic pair registry.
//!
//! The factory owns every [`Pair`] and is the only way to create one.
//! Pool identity is content-addressed: the custody account is a BLAKE3
//! hash over a domain tag and the canonical asset ordering, so any caller
//! can precompute a pool's account with [`Factory::pair_account`] without
//! consulting the registry.
//!
//! A canonical key maps to at most one pool, ever — pools are never
//! destroyed and never re-created. The append-only [`pairs`] sequence
//! preserves creation order.
//!
//! [`pairs`]: Factory::pairs

use std::collections::HashMap;

use log::info;

use crate::domain::{AccountId, AssetId, FactoryEvent, PairKey, Timestamp};
use crate::error::{AmmError, Result};
use crate::pair::Pair;

/// Domain tag for custody-account derivation; changing it re-addresses
/// every pool.
const PAIR_ACCOUNT_TAG: &[u8] = b"kswap/pair/v1";

/// Handle to a pool inside the registry.
///
/// Indices follow creation order: the `n`-th created pool has index `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(usize);

impl PairId {
    /// Position of the pool in the creation-ordered sequence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Registry of all pair pools, plus the protocol-fee sink toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Factory {
    pairs: Vec<Pair>,
    pairs_by_key: HashMap<PairKey, PairId>,
    fee_to: Option<AccountId>,
    fee_to_setter: AccountId,
    events: Vec<FactoryEvent>,
}

impl Factory {
    /// Creates an empty registry. `fee_to_setter` is the only account
    /// allowed to toggle the protocol-fee sink.
    #[must_use]
    pub fn new(fee_to_setter: AccountId) -> Self {
        Self {
            pairs: Vec::new(),
            pairs_by_key: HashMap::new(),
            fee_to: None,
            fee_to_setter,
            events: Vec::new(),
        }
    }

    /// Creates and indexes the pool for `(x, y)`.
    ///
    /// The two identifiers are ordered canonically before anything else,
    /// so `(x, y)` and `(y, x)` resolve to — and conflict with — the same
    /// pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `x == y`.
    /// - [`AmmError::ZeroAsset`] if either identifier is the null asset.
    /// - [`AmmError::PairExists`] if the canonical key is already mapped.
    pub fn create_pair(&mut self, x: AssetId, y: AssetId, now: Timestamp) -> Result<PairId> {
        if x == y {
            return Err(AmmError::IdenticalAssets);
        }
        if x.is_zero() || y.is_zero() {
            return Err(AmmError::ZeroAsset);
        }
        let key = PairKey::new(x, y)?;
        if self.pairs_by_key.contains_key(&key) {
            return Err(AmmError::PairExists);
        }

        let account = Self::pair_account(x, y)?;
        let id = PairId(self.pairs.len());
        self.pairs.push(Pair::new(key, account, now));
        self.pairs_by_key.insert(key, id);

        let pair_count = self.pairs.len() as u64;
        info!(
            "pair #{pair_count} created: ({}, {}) at {account}",
            key.asset_a(),
            key.asset_b()
        );
        self.events.push(FactoryEvent::PairCreated {
            asset_a: key.asset_a(),
            asset_b: key.asset_b(),
            pair_account: account,
            pair_count,
        });
        Ok(id)
    }

    /// Derives the custody account a pool for `(x, y)` has — or would
    /// have — without consulting the registry.
    ///
    /// Pure function of the canonical key: BLAKE3 over the domain tag and
    /// both identifiers in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if `x == y`.
    pub fn pair_account(x: AssetId, y: AssetId) -> Result<AccountId> {
        let key = PairKey::new(x, y)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(PAIR_ACCOUNT_TAG);
        hasher.update(key.asset_a().as_bytes());
        hasher.update(key.asset_b().as_bytes());
        Ok(AccountId::from_bytes(*hasher.finalize().as_bytes()))
    }

    /// Looks up the pool for `(x, y)`, in either argument order.
    #[must_use]
    pub fn get_pair(&self, x: &AssetId, y: &AssetId) -> Option<PairId> {
        PairKey::new(*x, *y)
            .ok()
            .and_then(|key| self.pairs_by_key.get(&key).copied())
    }

    /// Number of pools ever created.
    #[must_use]
    pub fn all_pairs_len(&self) -> usize {
        self.pairs.len()
    }

    /// Pools in creation order.
    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    /// Read access to a pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownPair`] for a stale or foreign id.
    pub fn pair(&self, id: PairId) -> Result<&Pair> {
        self.pairs.get(id.0).ok_or(AmmError::UnknownPair)
    }

    /// Write access to a pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownPair`] for a stale or foreign id.
    pub fn pair_mut(&mut self, id: PairId) -> Result<&mut Pair> {
        self.pairs.get_mut(id.0).ok_or(AmmError::UnknownPair)
    }

    /// Current protocol-fee sink, if enabled.
    #[must_use]
    pub const fn fee_to(&self) -> Option<AccountId> {
        self.fee_to
    }

    /// Account allowed to toggle the sink.
    #[must_use]
    pub const fn fee_to_setter(&self) -> AccountId {
        self.fee_to_setter
    }

    /// Enables or disables the protocol-fee sink.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Forbidden`] unless `caller` is the setter.
    pub fn set_fee_to(&mut self, caller: AccountId, fee_to: Option<AccountId>) -> Result<()> {
        if caller != self.fee_to_setter {
            return Err(AmmError::Forbidden);
        }
        self.fee_to = fee_to;
        Ok(())
    }

    /// Hands the setter role to another account.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Forbidden`] unless `caller` is the setter.
    pub fn set_fee_to_setter(&mut self, caller: AccountId, new_setter: AccountId) -> Result<()> {
        if caller != self.fee_to_setter {
            return Err(AmmError::Forbidden);
        }
        self.fee_to_setter = new_setter;
        Ok(())
    }

    /// Observable log of registry operations, oldest first.
    #[must_use]
    pub fn events(&self) -> &[FactoryEvent] {
        &self.events
    }
}
