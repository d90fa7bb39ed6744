//! Canonically ordered pair of distinct assets.

use super::AssetId;
use crate::error::AmmError;

/// An unordered asset pair stored in canonical order.
///
/// The canonical ordering guarantees `asset_a() < asset_b()` under the
/// lexicographic order on [`AssetId`], so `(X, Y)` and `(Y, X)` always
/// produce the same key and therefore resolve to the same pool.
///
/// # Examples
///
/// ```
/// use kswap::domain::{AssetId, PairKey};
///
/// let x = AssetId::from_bytes([2u8; 32]);
/// let y = AssetId::from_bytes([1u8; 32]);
///
/// // Order is enforced automatically:
/// let key = PairKey::new(x, y).expect("distinct assets");
/// assert_eq!(key.asset_a(), y);
/// assert_eq!(key.asset_b(), x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl PairKey {
    /// Creates a canonically ordered `PairKey`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if both identifiers are equal.
    pub fn new(first: AssetId, second: AssetId) -> Result<Self, AmmError> {
        if first == second {
            return Err(AmmError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the lower-ordered asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the higher-ordered asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the pair's two assets.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(AmmError::InvalidPath)
        }
    }
}
