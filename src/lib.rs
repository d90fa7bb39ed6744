//! # kswap
//!
//! Constant-product AMM engine: pair pools, a deterministic pair
//! registry, and a multi-hop router, as a single in-memory state machine.
//!
//! A [`Pair`](pair::Pair) holds two reserves and an issued-shares ledger
//! for one canonically ordered asset pair and prices trades by the
//! `x · y = k` rule with an integer 997/1000 (0.3%) fee. The
//! [`Factory`](factory::Factory) creates and indexes pools under
//! content-addressed custody accounts. The [`Router`](router::Router)
//! composes pool primitives into deadline-bounded, slippage-protected
//! user actions with all-or-nothing semantics.
//!
//! Token accounting is consumed as a capability: the engine only queries
//! balances and moves them through the [`Bank`](token::Bank) surface, an
//! in-memory fungible-ledger implementation shipped with the crate.
//!
//! # Quick Start
//!
//! ```rust
//! use kswap::domain::{AccountId, Amount, AssetId, Decimals, Timestamp};
//! use kswap::factory::Factory;
//! use kswap::router::{AddLiquidity, Router, SwapExactIn};
//! use kswap::token::{Bank, TokenInfo};
//!
//! // 1. Register two assets and approve the router as spender.
//! let alice = AccountId::from_bytes([0x11; 32]);
//! let router_account = AccountId::from_bytes([0x99; 32]);
//! let tka = AssetId::from_bytes([1; 32]);
//! let tkb = AssetId::from_bytes([2; 32]);
//!
//! let mut bank = Bank::new();
//! for (asset, symbol) in [(tka, "TKA"), (tkb, "TKB")] {
//!     bank.create_asset(
//!         asset,
//!         TokenInfo::new(format!("Token {symbol}"), symbol, Decimals::EIGHTEEN),
//!         alice,
//!         Amount::new(10_000_000),
//!     )
//!     .expect("asset registered");
//!     bank.approve(&asset, alice, router_account, Amount::MAX)
//!         .expect("router approved");
//! }
//!
//! // 2. Create the pool and seed it through the router.
//! let mut factory = Factory::new(alice);
//! let mut router = Router::new(&mut factory, &mut bank, router_account);
//! let (.., shares) = router
//!     .add_liquidity(
//!         alice,
//!         AddLiquidity {
//!             asset_a: tka,
//!             asset_b: tkb,
//!             amount_a_desired: Amount::new(1_000_000),
//!             amount_b_desired: Amount::new(1_000_000),
//!             amount_a_min: Amount::ZERO,
//!             amount_b_min: Amount::ZERO,
//!             to: alice,
//!             deadline: Timestamp::new(60),
//!         },
//!         Timestamp::new(0),
//!     )
//!     .expect("liquidity added");
//! assert!(!shares.is_zero());
//!
//! // 3. Swap with slippage protection.
//! let amounts = router
//!     .swap_exact_in(
//!         alice,
//!         SwapExactIn {
//!             amount_in: Amount::new(10_000),
//!             amount_out_min: Amount::new(9_800),
//!             path: vec![tka, tkb],
//!             to: alice,
//!             deadline: Timestamp::new(60),
//!         },
//!         Timestamp::new(1),
//!     )
//!     .expect("swap settled");
//! assert!(amounts[1] >= Amount::new(9_800));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  approves the Router, sets bounds and deadlines
//! └──────┬──────┘
//!        │ add/remove liquidity, swap_exact_in/out
//!        ▼
//! ┌─────────────┐
//! │    Router    │  projects amounts, pulls funds, chains hops
//! └──────┬──────┘
//!        │ resolve-or-create via canonical key
//!        ▼
//! ┌─────────────┐
//! │   Factory    │  content-addressed custody, append-only index
//! └──────┬──────┘
//!        │ mint / burn / swap / sync, reentrancy-guarded
//!        ▼
//! ┌─────────────┐
//! │    Pair      │  reserves + share ledger, x·y = k at 997/1000
//! └──────┬──────┘
//!        │ balance_of / transfer / transfer_from
//!        ▼
//! ┌─────────────┐
//! │    Bank      │  fungible ledgers (the token capability)
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`AssetId`](domain::AssetId), [`PairKey`](domain::PairKey), event records |
//! | [`token`] | The fungible-ledger capability: [`Bank`](token::Bank), [`Ledger`](token::Ledger) |
//! | [`pair`] | The pool state machine: [`Pair`](pair::Pair), [`FlashBorrower`](pair::FlashBorrower) |
//! | [`factory`] | Pool registry and fee-sink toggle: [`Factory`](factory::Factory) |
//! | [`router`] | Orchestration and off-line pricing: [`Router`](router::Router), [`router::quote`] |
//! | [`math`] | Checked wide arithmetic: [`math::wide`] |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod router;
pub mod token;
