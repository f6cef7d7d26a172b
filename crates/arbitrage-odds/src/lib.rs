//! Cross-bookmaker odds matching and two-way arbitrage detection.
//!
//! This crate takes two independently scraped lists of `(team, odds)` quotes,
//! pairs them by team name, and reports price combinations whose implied
//! probabilities sum to less than one.
//!
//! # Overview
//!
//! ```text
//! Site A:  HOU @ 1.80  DEN @ 2.20
//! Site B:  HOU @ 2.10  DEN @ 1.75
//!
//! Back DEN on A @ 2.20 and HOU on B @ 2.10:
//!   Implied:  0.4545 + 0.4762 = 0.9307
//!   Stakes:   48.84 / 51.16 of 100
//!   Payout:   107.44 either way (7.44% ROI)
//! ```
//!
//! # Modules
//!
//! - [`types`]: Quotes, odds, legs, and opportunities
//! - [`normalizer`]: Canonical team-name form
//! - [`matcher`]: Strict and fuzzy team matching
//! - [`calculator`]: Implied probability, ROI, and stake splitting
//! - [`scanner`]: Fixture iteration and opportunity assembly
//!
//! # Example
//!
//! ```ignore
//! use oddsarb_arbitrage::{OpportunityScanner, ScannerConfig};
//!
//! let scanner = OpportunityScanner::with_config(ScannerConfig::default());
//! for opp in scanner.find_opportunities(&site_a, &site_b, false) {
//!     println!("{opp}");
//! }
//! ```
//!
//! # Scraper Contract
//!
//! Source A's quotes must arrive as consecutive `(home, away)` pairs. The
//! engine does no I/O and keeps no state between calls.

pub mod calculator;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod scanner;
pub mod types;

// Re-export main types for convenience
pub use calculator::{
    break_even_odds, calculate, calculate_odds, calculate_stakes, implied_probability, ArbCheck,
};
pub use error::OddsError;
pub use matcher::{
    find_match, FuzzyMatcher, MatchConfig, MatchScore, NamePair, RuleHit, ScoringRule,
    ScoringWeights,
};
pub use normalizer::{normalize, MatchMode};
pub use scanner::{find_opportunities, OpportunityScanner, ScanReport, ScanSummary, ScannerConfig};
pub use types::{Combination, Leg, Odds, OddsQuote, Opportunity, Source, StakeSplit};
