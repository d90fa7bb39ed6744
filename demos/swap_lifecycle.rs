//! Full lifecycle against one pool: register assets, seed liquidity,
//! swap both directions, and exit.
//!
//! ```sh
//! cargo run --example swap_lifecycle
//! ```

use kswap::prelude::*;

fn main() -> Result<()> {
    let alice = AccountId::from_bytes([0x11; 32]);
    let router_id = AccountId::from_bytes([0x99; 32]);
    let tka = AssetId::from_bytes([1; 32]);
    let tkb = AssetId::from_bytes([2; 32]);

    // Two assets, alice holding the supply, router approved as spender.
    let mut bank = Bank::new();
    for (asset, symbol) in [(tka, "TKA"), (tkb, "TKB")] {
        bank.create_asset(
            asset,
            TokenInfo::new(format!("Token {symbol}"), symbol, Decimals::EIGHTEEN),
            alice,
            Amount::new(1_000_000_000),
        )?;
        bank.approve(&asset, alice, router_id, Amount::MAX)?;
    }

    let mut factory = Factory::new(alice);
    let mut router = Router::new(&mut factory, &mut bank, router_id);

    // Seed the pool 1:1.
    let (a_in, b_in, shares) = router.add_liquidity(
        alice,
        AddLiquidity {
            asset_a: tka,
            asset_b: tkb,
            amount_a_desired: Amount::new(500_000_000),
            amount_b_desired: Amount::new(500_000_000),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice,
            deadline: Timestamp::new(600),
        },
        Timestamp::new(0),
    )?;
    println!("seeded {a_in} TKA + {b_in} TKB for {shares} shares");

    // Swap exact-in, then the other direction exact-out.
    let amounts = router.swap_exact_in(
        alice,
        SwapExactIn {
            amount_in: Amount::new(10_000_000),
            amount_out_min: Amount::new(9_000_000),
            path: vec![tka, tkb],
            to: alice,
            deadline: Timestamp::new(600),
        },
        Timestamp::new(30),
    )?;
    println!("swapped {} TKA for {} TKB", amounts[0], amounts[1]);

    let amounts = router.swap_exact_out(
        alice,
        SwapExactOut {
            amount_out: Amount::new(5_000_000),
            amount_in_max: Amount::new(6_000_000),
            path: vec![tkb, tka],
            to: alice,
            deadline: Timestamp::new(600),
        },
        Timestamp::new(60),
    )?;
    println!("bought back {} TKA for {} TKB", amounts[1], amounts[0]);

    // Exit the position.
    let pair_account = Factory::pair_account(tka, tkb)?;
    println!("pool custody account: {pair_account}");
    if let Some(id) = factory.get_pair(&tka, &tkb) {
        factory
            .pair_mut(id)?
            .approve_shares(alice, router_id, shares);
    }
    let mut router = Router::new(&mut factory, &mut bank, router_id);
    let (out_a, out_b) = router.remove_liquidity(
        alice,
        RemoveLiquidity {
            asset_a: tka,
            asset_b: tkb,
            shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice,
            deadline: Timestamp::new(600),
        },
        Timestamp::new(90),
    )?;
    println!("exited with {out_a} TKA + {out_b} TKB");

    Ok(())
}
