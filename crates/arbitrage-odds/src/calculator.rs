//! Two-way arbitrage math on decimal odds.
//!
//! For decimal odds `o` the implied probability is `1/o`. Two opposing legs
//! form an arbitrage when their implied probabilities sum to less than one:
//!
//! ```text
//! Leg A: DEN @ 2.20  -> 0.4545
//! Leg B: HOU @ 2.10  -> 0.4762
//!                       ------
//! Total implied:        0.9307
//! ROI: (1 / 0.9307 - 1) * 100 = 7.44%
//! ```
//!
//! All functions are total: degenerate inputs produce [`ArbCheck::none`] or
//! `None`, never a panic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Odds, StakeSplit};

/// Decimal places kept on displayed percentages.
pub const ROI_DISPLAY_DP: u32 = 2;

/// Result of checking a pair of odds for arbitrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbCheck {
    /// True when the ROI is strictly positive.
    pub is_arb: bool,
    /// ROI in percent, rounded to 2 dp.
    pub roi_percent: Decimal,
    /// ROI in percent at full precision.
    pub roi_exact: Decimal,
    /// Sum of both legs' implied probabilities (zero when not computed).
    pub total_implied: Decimal,
}

impl ArbCheck {
    /// The "nothing to see" result used for invalid inputs.
    #[must_use]
    pub fn none() -> Self {
        Self {
            is_arb: false,
            roi_percent: Decimal::ZERO,
            roi_exact: Decimal::ZERO,
            total_implied: Decimal::ZERO,
        }
    }
}

/// Returns `1/odds`, or `None` for non-positive odds.
#[must_use]
pub fn implied_probability(odds: Decimal) -> Option<Decimal> {
    if odds <= Decimal::ZERO {
        return None;
    }
    Decimal::ONE.checked_div(odds)
}

fn total_implied(odds_a: Decimal, odds_b: Decimal) -> Option<Decimal> {
    implied_probability(odds_a)?.checked_add(implied_probability(odds_b)?)
}

/// Checks two decimal odds for a two-way arbitrage.
///
/// Either input `<= 0` yields [`ArbCheck::none`].
#[must_use]
pub fn calculate(odds_a: Decimal, odds_b: Decimal) -> ArbCheck {
    let Some(total) = total_implied(odds_a, odds_b) else {
        return ArbCheck::none();
    };
    let Some(roi_exact) = Decimal::ONE
        .checked_div(total)
        .and_then(|inverse| (inverse - Decimal::ONE).checked_mul(dec!(100)))
    else {
        return ArbCheck::none();
    };

    ArbCheck {
        is_arb: roi_exact > Decimal::ZERO,
        roi_percent: roi_exact.round_dp(ROI_DISPLAY_DP),
        roi_exact,
        total_implied: total,
    }
}

/// Checks two scraped odds; suspended or missing odds yield [`ArbCheck::none`].
#[must_use]
pub fn calculate_odds(odds_a: &Odds, odds_b: &Odds) -> ArbCheck {
    match (odds_a, odds_b) {
        (Odds::Active(a), Odds::Active(b)) => calculate(*a, *b),
        _ => ArbCheck::none(),
    }
}

/// Splits `total_stake` so that both legs pay out the same amount.
///
/// `stake_x = total_stake * (1/odds_x) / total_implied`. Returns `None` when
/// either odds is `<= 1` or the stake is not positive.
#[must_use]
pub fn calculate_stakes(
    total_stake: Decimal,
    odds_a: Decimal,
    odds_b: Decimal,
) -> Option<StakeSplit> {
    if odds_a <= Decimal::ONE || odds_b <= Decimal::ONE || total_stake <= Decimal::ZERO {
        return None;
    }

    let total = total_implied(odds_a, odds_b)?;
    let stake_a = total_stake
        .checked_mul(implied_probability(odds_a)?)?
        .checked_div(total)?;
    let stake_b = total_stake
        .checked_mul(implied_probability(odds_b)?)?
        .checked_div(total)?;
    let total_return = stake_a.checked_mul(odds_a)?;
    let profit = total_return - total_stake;
    let roi_percent = profit
        .checked_div(total_stake)?
        .checked_mul(dec!(100))?
        .round_dp(ROI_DISPLAY_DP);

    Some(StakeSplit {
        stake_a,
        stake_b,
        total_return,
        profit,
        roi_percent,
    })
}

/// Counter-leg odds at which a pair breaks exactly even: `odds / (odds - 1)`.
///
/// Any opposing price above this is an arbitrage.
#[must_use]
pub fn break_even_odds(odds: Decimal) -> Option<Decimal> {
    if odds <= Decimal::ONE {
        return None;
    }
    odds.checked_div(odds - Decimal::ONE)
}
