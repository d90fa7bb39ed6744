//! Unified error types for the kswap library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.
//!
//! The variants fall into four groups, mirroring how callers should react:
//!
//! - **Input validation** ([`IdenticalAssets`](AmmError::IdenticalAssets),
//!   [`ZeroAsset`](AmmError::ZeroAsset), [`Expired`](AmmError::Expired),
//!   [`InvalidPath`](AmmError::InvalidPath)) — the call was malformed;
//!   retrying without changing inputs cannot succeed.
//! - **Market conditions** (`Insufficient*`,
//!   [`ExcessiveInputAmount`](AmmError::ExcessiveInputAmount),
//!   [`ConstantProductViolation`](AmmError::ConstantProductViolation)) —
//!   the pool could not satisfy the request at current reserves; the
//!   caller may retry with adjusted bounds or after reserves change.
//! - **State conflicts** ([`PairExists`](AmmError::PairExists),
//!   [`ReentrantCall`](AmmError::ReentrantCall),
//!   [`Forbidden`](AmmError::Forbidden)) — integration errors or attack
//!   attempts, never expected in normal operation.
//! - **Custody and arithmetic** — propagated from the token ledgers and
//!   the checked math layer.
//!
//! Every state-changing entry point is atomic: on `Err`, state is exactly
//! as it was before the call.

use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Unified error enum for every fallible operation in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AmmError {
    // -- input validation ---------------------------------------------------
    /// A pair requires two distinct asset identifiers.
    #[error("identical asset identifiers")]
    IdenticalAssets,

    /// The zero asset identifier is reserved and cannot be pooled.
    #[error("zero asset identifier")]
    ZeroAsset,

    /// The caller-supplied deadline is in the past.
    #[error("operation deadline expired")]
    Expired,

    /// A trade path must name at least two assets, each hop distinct.
    #[error("invalid trade path")]
    InvalidPath,

    // -- market conditions --------------------------------------------------
    /// Pool reserves cannot satisfy the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Projected or actual output fell below the caller's bound.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A swap settled without any input being paid in.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Genesis deposit too small to cover the permanently-burned minimum.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// A deposit rounded down to zero pool shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A share redemption rounded down to zero on one side.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Matched first-asset amount fell below the caller's minimum.
    #[error("insufficient amount of first asset")]
    InsufficientAAmount,

    /// Matched second-asset amount fell below the caller's minimum.
    #[error("insufficient amount of second asset")]
    InsufficientBAmount,

    /// Required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The fee-adjusted reserve product would shrink.
    #[error("constant product invariant violated")]
    ConstantProductViolation,

    // -- state conflicts ----------------------------------------------------
    /// A pool for this canonical asset pair already exists.
    #[error("pair already exists")]
    PairExists,

    /// No pool exists for the requested asset pair.
    #[error("unknown pair")]
    UnknownPair,

    /// An asset with this identifier is already registered.
    #[error("asset already exists")]
    AssetExists,

    /// No ledger is registered under this asset identifier.
    #[error("unknown asset")]
    UnknownAsset,

    /// A pool operation re-entered while its exclusive guard was held.
    #[error("reentrant call")]
    ReentrantCall,

    /// The caller is not authorized for this operation.
    #[error("caller is not authorized")]
    Forbidden,

    // -- custody ------------------------------------------------------------
    /// Transfer amount exceeds the sender's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Transfer amount exceeds the spender's allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    // -- arithmetic ---------------------------------------------------------
    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Checked arithmetic underflowed.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}
