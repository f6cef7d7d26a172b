//! Stake split calculator for a single pair of odds.

use anyhow::{bail, Result};
use clap::Args;
use oddsarb_arbitrage::{break_even_odds, calculate, calculate_stakes};
use rust_decimal::Decimal;

/// Arguments for the stakes command.
#[derive(Args, Debug, Clone)]
pub struct StakesArgs {
    /// Decimal odds of the leg backed on source A
    #[arg(long)]
    pub odds_a: Decimal,

    /// Decimal odds of the leg backed on source B
    #[arg(long)]
    pub odds_b: Decimal,

    /// Total stake to split
    #[arg(long, default_value = "100")]
    pub stake: Decimal,
}

pub fn run_stakes(args: StakesArgs) -> Result<()> {
    let Some(split) = calculate_stakes(args.stake, args.odds_a, args.odds_b) else {
        bail!(
            "No valid stake split for stake {} at odds {} / {}: odds must exceed 1 and stake must be positive",
            args.stake,
            args.odds_a,
            args.odds_b
        );
    };
    let check = calculate(args.odds_a, args.odds_b);

    println!("Implied total: {}", check.total_implied.round_dp(4));
    println!("Stake A: {} @ {}", split.stake_a.round_dp(2), args.odds_a);
    println!("Stake B: {} @ {}", split.stake_b.round_dp(2), args.odds_b);
    println!("Return:  {}", split.total_return.round_dp(2));
    println!("Profit:  {} ({}%)", split.profit.round_dp(2), split.roi_percent);

    if check.is_arb {
        println!("Arbitrage: yes");
    } else {
        println!("Arbitrage: no");
        if let Some(needed) = break_even_odds(args.odds_a) {
            println!(
                "Leg B needs odds above {} to break even against {}",
                needed.round_dp(3),
                args.odds_a
            );
        }
    }

    Ok(())
}
