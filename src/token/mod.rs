//! The fungible-token capability consumed by pools and the router.
//!
//! The engine treats token accounting as an external collaborator: pools
//! and the router only ever query balances, transfer, and
//! transfer-with-allowance through the [`Bank`] surface and trust those
//! operations to be atomic. This module ships an in-memory implementation
//! of that capability so the state machine can be exercised end to end.
//!
//! Non-standard behaviours (silent failure, fee-on-transfer) are out of
//! scope; a transfer either fully succeeds or fails the enclosing
//! operation.

mod bank;
mod ledger;

pub use bank::{Bank, Token, TokenInfo};
pub use ledger::Ledger;
