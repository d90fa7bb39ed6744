//! Convenience re-exports for common types.
//!
//! A single import brings the whole working surface into scope:
//!
//! ```rust
//! use kswap::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, Decimals, FactoryEvent, LedgerEvent, PairEvent, PairKey, Rounding,
    Timestamp,
};
pub use crate::error::{AmmError, Result};
pub use crate::factory::{Factory, PairId};
pub use crate::pair::{FlashBorrower, Pair, FEE_DENOMINATOR, FEE_NUMERATOR, MINIMUM_LIQUIDITY};
pub use crate::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn, SwapExactOut};
pub use crate::token::{Bank, Ledger, Token, TokenInfo};
