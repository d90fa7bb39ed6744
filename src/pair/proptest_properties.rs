//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers the engine's structural properties:
//!
//! 1. **Invariant preservation** — the reserve product never decreases
//!    across a fee-bearing swap.
//! 2. **Mint/burn round trip** — redeeming freshly minted shares never
//!    returns more than was deposited.
//! 3. **Canonical key** — pair keys are order-independent.
//! 4. **Quote monotonicity** — a larger input never buys less output.
//! 5. **Exact-out sufficiency** — the required input always buys at
//!    least the requested output.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, AssetId, Decimals, PairKey, Timestamp};
use crate::router::quote;
use crate::token::{Bank, TokenInfo};

use super::Pair;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(byte: u8) -> AssetId {
    AssetId::from_bytes([byte; 32])
}

fn user() -> AccountId {
    AccountId::from_bytes([0x11; 32])
}

fn pool_account() -> AccountId {
    AccountId::from_bytes([0xAA; 32])
}

/// Bank plus a pool seeded at the given reserves via a genesis mint.
fn seeded_pool(reserve_a: u128, reserve_b: u128) -> (Bank, Pair) {
    let mut bank = Bank::new();
    for (id, symbol) in [(asset(1), "TKA"), (asset(2), "TKB")] {
        let Ok(()) = bank.create_asset(
            id,
            TokenInfo::new(format!("Token {symbol}"), symbol, Decimals::EIGHTEEN),
            user(),
            Amount::MAX,
        ) else {
            panic!("create_asset in fixture");
        };
    }
    let Ok(key) = PairKey::new(asset(1), asset(2)) else {
        panic!("valid key");
    };
    let mut pair = Pair::new(key, pool_account(), Timestamp::new(0));
    let Ok(()) = bank.transfer(&asset(1), user(), pool_account(), Amount::new(reserve_a)) else {
        panic!("seed transfer a");
    };
    let Ok(()) = bank.transfer(&asset(2), user(), pool_account(), Amount::new(reserve_b)) else {
        panic!("seed transfer b");
    };
    let Ok(_) = pair.mint(&mut bank, user(), user(), None, Timestamp::new(0)) else {
        panic!("genesis mint");
    };
    (bank, pair)
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    // Wide enough to exercise real magnitudes, small enough that the
    // genesis product fits u128 comfortably.
    10_000u128..1_000_000_000_000
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn swap_never_shrinks_reserve_product(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        input_permille in 1u128..500,
    ) {
        let (mut bank, mut pair) = seeded_pool(reserve_a, reserve_b);
        let input = Amount::new((reserve_a * input_permille / 1_000).max(1));
        let Ok(out) = quote::amount_out(input, Amount::new(reserve_a), Amount::new(reserve_b))
        else {
            panic!("quote");
        };
        prop_assume!(!out.is_zero());

        let k_before = reserve_a * reserve_b;
        let Ok(()) = bank.transfer(&asset(1), user(), pool_account(), input) else {
            panic!("input transfer");
        };
        let Ok(()) = pair.swap(
            &mut bank,
            user(),
            Amount::ZERO,
            out,
            user(),
            None,
            Timestamp::new(1),
        ) else {
            panic!("swap at quoted output");
        };
        let (ra, rb, _) = pair.reserves();
        prop_assert!(ra.get() * rb.get() >= k_before);
    }

    #[test]
    fn mint_burn_round_trip_never_profits(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        deposit_permille in 1u128..1_000,
    ) {
        let (mut bank, mut pair) = seeded_pool(reserve_a, reserve_b);
        let deposit_a = Amount::new((reserve_a * deposit_permille / 1_000).max(1));
        let deposit_b = Amount::new((reserve_b * deposit_permille / 1_000).max(1));

        let Ok(()) = bank.transfer(&asset(1), user(), pool_account(), deposit_a) else {
            panic!("deposit a");
        };
        let Ok(()) = bank.transfer(&asset(2), user(), pool_account(), deposit_b) else {
            panic!("deposit b");
        };
        let minted = match pair.mint(&mut bank, user(), user(), None, Timestamp::new(1)) {
            Ok(minted) => minted,
            // A dust deposit may round to zero shares; nothing to check.
            Err(_) => return Ok(()),
        };

        let Ok(()) = pair.transfer_shares(user(), pool_account(), minted) else {
            panic!("share transfer");
        };
        let Ok((out_a, out_b)) = pair.burn(&mut bank, user(), user(), None, Timestamp::new(2))
        else {
            panic!("burn");
        };
        prop_assert!(out_a <= deposit_a);
        prop_assert!(out_b <= deposit_b);
    }

    #[test]
    fn pair_key_is_order_independent(x in any::<[u8; 32]>(), y in any::<[u8; 32]>()) {
        let (x, y) = (AssetId::from_bytes(x), AssetId::from_bytes(y));
        prop_assume!(x != y);
        let (Ok(xy), Ok(yx)) = (PairKey::new(x, y), PairKey::new(y, x)) else {
            panic!("distinct assets form a key");
        };
        prop_assert_eq!(xy, yx);
        prop_assert!(xy.asset_a() < xy.asset_b());
    }

    #[test]
    fn larger_input_never_buys_less(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        input in 1u128..1_000_000_000,
        extra in 1u128..1_000_000_000,
    ) {
        let (ra, rb) = (Amount::new(reserve_a), Amount::new(reserve_b));
        let (Ok(small), Ok(large)) = (
            quote::amount_out(Amount::new(input), ra, rb),
            quote::amount_out(Amount::new(input + extra), ra, rb),
        ) else {
            panic!("quote");
        };
        prop_assert!(large >= small);
    }

    #[test]
    fn required_input_is_sufficient(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        out_permille in 1u128..900,
    ) {
        let (ra, rb) = (Amount::new(reserve_a), Amount::new(reserve_b));
        let target = Amount::new((reserve_b * out_permille / 1_000).max(1));
        let Ok(needed) = quote::amount_in(target, ra, rb) else {
            panic!("amount_in");
        };
        let Ok(bought) = quote::amount_out(needed, ra, rb) else {
            panic!("amount_out");
        };
        prop_assert!(bought >= target);
    }
}
