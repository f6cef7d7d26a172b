//! Shared types for cross-bookmaker odds arbitrage.
//!
//! This module defines the quotes fed in by the scrapers, the evaluated legs,
//! and the opportunities handed to the notification and logging consumers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::OddsError;

// =============================================================================
// Source Identifiers
// =============================================================================

/// Identifies which of the two scraped bookmakers a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The primary site; its list drives the home/away iteration.
    A,
    /// The secondary site; its entries are looked up by team name.
    B,
}

impl Source {
    /// Returns the other source.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Returns the display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Odds
// =============================================================================

/// Sentinel label scrapers emit for a market that is temporarily closed.
pub const SUSPENDED_LABEL: &str = "Suspended";

/// Decimal odds as scraped, or the suspended sentinel.
///
/// Serialized as a decimal string (`"1.85"`) or `"Suspended"`. Deserializes from
/// a JSON number, a numeric string, or any suspended spelling accepted by
/// [`Odds::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OddsRepr", into = "OddsRepr")]
pub enum Odds {
    /// A quoted decimal price. Not yet validated against the `> 1` convention.
    Active(Decimal),
    /// The market is closed; excluded from every calculation.
    Suspended,
}

impl Odds {
    /// Returns the price if it is usable for arbitrage math (strictly above 1.0).
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Active(odds) if *odds > Decimal::ONE => Some(*odds),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }
}

impl FromStr for Odds {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed == "-"
            || trimmed.eq_ignore_ascii_case(SUSPENDED_LABEL)
            || trimmed.eq_ignore_ascii_case("susp")
        {
            return Ok(Self::Suspended);
        }

        // Some sites render decimal commas ("1,85").
        let normalized = trimmed.replace(',', ".");
        Decimal::from_str(&normalized)
            .map(Self::Active)
            .map_err(|_| OddsError::Unparseable(trimmed.to_string()))
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active(odds) => write!(f, "{odds}"),
            Self::Suspended => write!(f, "{SUSPENDED_LABEL}"),
        }
    }
}

impl From<Decimal> for Odds {
    fn from(odds: Decimal) -> Self {
        Self::Active(odds)
    }
}

/// Wire representation backing the serde impls of [`Odds`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OddsRepr {
    Number(Decimal),
    Text(String),
}

impl TryFrom<OddsRepr> for Odds {
    type Error = OddsError;

    fn try_from(repr: OddsRepr) -> Result<Self, Self::Error> {
        match repr {
            OddsRepr::Number(odds) => Ok(Self::Active(odds)),
            OddsRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Odds> for OddsRepr {
    fn from(odds: Odds) -> Self {
        match odds {
            Odds::Active(value) => Self::Number(value),
            Odds::Suspended => Self::Text(SUSPENDED_LABEL.to_string()),
        }
    }
}

// =============================================================================
// Quotes and Legs
// =============================================================================

/// A single scraped (team, odds) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsQuote {
    /// Team label exactly as the site renders it.
    pub team: String,
    pub odds: Odds,
    pub source: Source,
    /// Opaque link or element id the auto-trader uses to find the bet button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl OddsQuote {
    /// Creates an active quote.
    #[must_use]
    pub fn new(team: impl Into<String>, odds: Decimal, source: Source) -> Self {
        Self {
            team: team.into(),
            odds: Odds::Active(odds),
            source,
            link: None,
        }
    }

    /// Creates a suspended quote.
    #[must_use]
    pub fn suspended(team: impl Into<String>, source: Source) -> Self {
        Self {
            team: team.into(),
            odds: Odds::Suspended,
            source,
            link: None,
        }
    }

    /// Attaches a link or element id.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Converts to an evaluated leg if the odds are usable.
    #[must_use]
    pub fn to_leg(&self) -> Option<Leg> {
        Some(Leg {
            team: self.team.clone(),
            odds: self.odds.price()?,
            source: self.source,
            link: self.link.clone(),
        })
    }
}

/// One side of an opportunity, with odds known to be valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub team: String,
    pub odds: Decimal,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// =============================================================================
// Opportunities
// =============================================================================

/// Which cross combination of a fixture produced an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combination {
    /// Home team on A against the away team's match on B.
    HomeVsAwayMatch,
    /// Away team on A against the home team's match on B.
    AwayVsHomeMatch,
}

impl Combination {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HomeVsAwayMatch => "home/away-match",
            Self::AwayVsHomeMatch => "away/home-match",
        }
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stake allocation that pays out the same amount whichever leg wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSplit {
    /// Amount to place on leg A.
    pub stake_a: Decimal,
    /// Amount to place on leg B.
    pub stake_b: Decimal,
    /// Payout if either leg wins.
    pub total_return: Decimal,
    /// `total_return - total stake`.
    pub profit: Decimal,
    /// Profit over total stake, in percent, rounded to 2 dp.
    pub roi_percent: Decimal,
}

/// A detected two-way arbitrage between the sources.
///
/// Immutable once produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    /// `"<home> vs <away>"` using the source A labels.
    pub match_label: String,
    pub leg_a: Leg,
    pub leg_b: Leg,
    pub combination: Combination,
    /// ROI in percent, rounded to 2 dp.
    pub roi_percent: Decimal,
    /// ROI in percent at full precision.
    pub roi_exact: Decimal,
    /// Split of the configured total stake; `None` if the stake is not positive.
    pub stake_split: Option<StakeSplit>,
}

impl Opportunity {
    /// Stable identity across scans, used to de-duplicate notifications.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.match_label, self.leg_a.team, self.leg_b.team
        )
    }
}

impl std::fmt::Display for Opportunity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} @ {} ({}) / {} @ {} ({}) -> ROI {:.2}%",
            self.match_label,
            self.leg_a.team,
            self.leg_a.odds,
            self.leg_a.source,
            self.leg_b.team,
            self.leg_b.odds,
            self.leg_b.source,
            self.roi_percent.round_dp(2),
        )?;
        if let Some(split) = &self.stake_split {
            write!(
                f,
                " | stakes {:.2} / {:.2}, profit {:.2}",
                split.stake_a.round_dp(2),
                split.stake_b.round_dp(2),
                split.profit.round_dp(2)
            )?;
        }
        Ok(())
    }
}
