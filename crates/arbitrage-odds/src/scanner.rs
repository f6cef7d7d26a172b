//! Opportunity scanning across two scraped odds lists.
//!
//! # Precondition
//!
//! Source A's list is ordered as consecutive `(home, away)` pairs, exactly as
//! the scraper walks the fixture rows. The scanner trusts that order and does
//! not try to re-derive fixtures; a trailing unpaired entry is dropped.
//!
//! For every fixture both teams are looked up in source B. When both resolve,
//! the two cross combinations are checked:
//!
//! ```text
//! A: HOU @ 1.80 | DEN @ 2.20        B: HOU @ 2.10 | DEN @ 1.75
//!
//! 1. A HOU vs B DEN:  1/1.80 + 1/1.75 = 1.127  -> no arb
//! 2. A DEN vs B HOU:  1/2.20 + 1/2.10 = 0.931  -> 7.44% ROI
//! ```

use oddsarb_core::AppConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::calculator::{calculate, calculate_stakes};
use crate::matcher::{FuzzyMatcher, MatchConfig};
use crate::normalizer::MatchMode;
use crate::types::{Combination, OddsQuote, Opportunity};

// =============================================================================
// Scanner Configuration
// =============================================================================

/// Configuration for the opportunity scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Total stake split across the two legs of every opportunity.
    pub total_stake: Decimal,

    /// Relaxed matcher settings.
    pub matching: MatchConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            total_stake: dec!(100),
            matching: MatchConfig::default(),
        }
    }
}

impl From<&AppConfig> for ScannerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            total_stake: config.scanner.total_stake,
            matching: MatchConfig::from(&config.matching),
        }
    }
}

impl ScannerConfig {
    /// Sets the total stake.
    #[must_use]
    pub fn with_total_stake(mut self, total_stake: Decimal) -> Self {
        self.total_stake = total_stake;
        self
    }
}

// =============================================================================
// Scan Results
// =============================================================================

/// Counters describing one scan, for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Fixtures (home/away pairs) taken from source A.
    pub pairs_scanned: u32,
    /// Fixtures whose two teams both resolved in source B.
    pub pairs_matched: u32,
    /// Source A teams with no acceptable match in source B.
    pub unmatched_teams: u32,
    /// Fixtures where home and away resolved to the same B entry.
    pub ambiguous_pairs: u32,
    /// Combinations skipped for suspended or invalid odds.
    pub skipped_combinations: u32,
    /// Combinations run through the calculator.
    pub combinations_evaluated: u32,
    /// Opportunities emitted.
    pub opportunities: u32,
    /// Highest ROI seen among emitted opportunities.
    pub best_roi_percent: Option<Decimal>,
    /// True if source A had an odd length and its last entry was dropped.
    pub trailing_unpaired: bool,
}

/// Opportunities plus the counters of the scan that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub opportunities: Vec<Opportunity>,
    pub summary: ScanSummary,
}

// =============================================================================
// Opportunity Scanner
// =============================================================================

/// Pairs source A fixtures with source B quotes and emits arbitrage opportunities.
///
/// Stateless between calls; the same inputs always give the same output.
#[derive(Debug, Clone)]
pub struct OpportunityScanner {
    config: ScannerConfig,
    matcher: FuzzyMatcher,
}

impl OpportunityScanner {
    /// Creates a scanner with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Creates a scanner with custom configuration.
    #[must_use]
    pub fn with_config(config: ScannerConfig) -> Self {
        let matcher = FuzzyMatcher::with_config(config.matching.clone());
        Self { config, matcher }
    }

    /// Creates a scanner with a custom matcher, e.g. one with extra rules.
    #[must_use]
    pub fn with_matcher(config: ScannerConfig, matcher: FuzzyMatcher) -> Self {
        Self { config, matcher }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Returns the matcher.
    #[must_use]
    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Finds arbitrage opportunities between the two lists.
    ///
    /// Output order follows the fixture order of `list_a`, with the
    /// home/away-match combination before the away/home-match one.
    #[must_use]
    pub fn find_opportunities(
        &self,
        list_a: &[OddsQuote],
        list_b: &[OddsQuote],
        strict: bool,
    ) -> Vec<Opportunity> {
        self.scan(list_a, list_b, strict).opportunities
    }

    /// Like [`Self::find_opportunities`], also returning scan counters.
    #[must_use]
    pub fn scan(&self, list_a: &[OddsQuote], list_b: &[OddsQuote], strict: bool) -> ScanReport {
        let mode = MatchMode::from_strict(strict);
        let mut report = ScanReport::default();

        let mut fixtures = list_a.chunks_exact(2);
        for fixture in fixtures.by_ref() {
            self.scan_fixture(&fixture[0], &fixture[1], list_b, mode, &mut report);
        }

        if let Some(dropped) = fixtures.remainder().first() {
            debug!(team = %dropped.team, "Dropping unpaired trailing entry");
            report.summary.trailing_unpaired = true;
        }

        let summary = &report.summary;
        info!(
            pairs_scanned = summary.pairs_scanned,
            pairs_matched = summary.pairs_matched,
            unmatched_teams = summary.unmatched_teams,
            combinations_evaluated = summary.combinations_evaluated,
            opportunities = summary.opportunities,
            best_roi_percent = ?summary.best_roi_percent,
            strict = strict,
            "Odds scan complete"
        );

        report
    }

    fn scan_fixture(
        &self,
        home: &OddsQuote,
        away: &OddsQuote,
        list_b: &[OddsQuote],
        mode: MatchMode,
        report: &mut ScanReport,
    ) {
        let summary = &mut report.summary;
        summary.pairs_scanned += 1;

        let match_home = self.matcher.find_match(list_b, &home.team, mode);
        let match_away = self.matcher.find_match(list_b, &away.team, mode);

        let (match_home, match_away) = match (match_home, match_away) {
            (Some(h), Some(a)) => (h, a),
            (h, a) => {
                summary.unmatched_teams += u32::from(h.is_none()) + u32::from(a.is_none());
                debug!(
                    home = %home.team,
                    away = %away.team,
                    home_matched = h.is_some(),
                    away_matched = a.is_some(),
                    "Fixture not found on source B"
                );
                return;
            }
        };

        if std::ptr::eq(match_home, match_away) {
            summary.ambiguous_pairs += 1;
            debug!(
                home = %home.team,
                away = %away.team,
                matched = %match_home.team,
                "Both teams matched the same source B entry"
            );
            return;
        }
        summary.pairs_matched += 1;

        let match_label = format!("{} vs {}", home.team, away.team);
        let combinations = [
            (Combination::HomeVsAwayMatch, home, match_away),
            (Combination::AwayVsHomeMatch, away, match_home),
        ];

        for (combination, quote_a, quote_b) in combinations {
            let (Some(leg_a), Some(leg_b)) = (quote_a.to_leg(), quote_b.to_leg()) else {
                report.summary.skipped_combinations += 1;
                trace!(
                    fixture = %match_label,
                    combination = %combination,
                    odds_a = %quote_a.odds,
                    odds_b = %quote_b.odds,
                    "Skipping combination with unusable odds"
                );
                continue;
            };

            report.summary.combinations_evaluated += 1;
            let check = calculate(leg_a.odds, leg_b.odds);
            if !check.is_arb {
                trace!(
                    fixture = %match_label,
                    combination = %combination,
                    total_implied = %check.total_implied,
                    "No arbitrage"
                );
                continue;
            }

            let stake_split = calculate_stakes(self.config.total_stake, leg_a.odds, leg_b.odds);
            let opportunity = Opportunity {
                match_label: match_label.clone(),
                leg_a,
                leg_b,
                combination,
                roi_percent: check.roi_percent,
                roi_exact: check.roi_exact,
                stake_split,
            };

            info!(
                fixture = %opportunity.match_label,
                team_a = %opportunity.leg_a.team,
                odds_a = %opportunity.leg_a.odds,
                team_b = %opportunity.leg_b.team,
                odds_b = %opportunity.leg_b.odds,
                roi_percent = %opportunity.roi_percent,
                "Arbitrage opportunity detected"
            );

            let summary = &mut report.summary;
            summary.opportunities += 1;
            summary.best_roi_percent = Some(
                summary
                    .best_roi_percent
                    .map_or(check.roi_percent, |best| best.max(check.roi_percent)),
            );
            report.opportunities.push(opportunity);
        }
    }
}

impl Default for OpportunityScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds opportunities with the default configuration.
#[must_use]
pub fn find_opportunities(
    list_a: &[OddsQuote],
    list_b: &[OddsQuote],
    strict: bool,
) -> Vec<Opportunity> {
    OpportunityScanner::new().find_opportunities(list_a, list_b, strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn quote_a(team: &str, odds: Decimal) -> OddsQuote {
        OddsQuote::new(team, odds, Source::A)
    }

    fn quote_b(team: &str, odds: Decimal) -> OddsQuote {
        OddsQuote::new(team, odds, Source::B)
    }

    fn nba_lists() -> (Vec<OddsQuote>, Vec<OddsQuote>) {
        (
            vec![quote_a("HOU", dec!(1.8)), quote_a("DEN", dec!(2.2))],
            vec![quote_b("HOU", dec!(2.1)), quote_b("DEN", dec!(1.75))],
        )
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_scanner_config_default() {
        let config = ScannerConfig::default();
        assert_eq!(config.total_stake, dec!(100));
        assert_eq!(config.matching.threshold, 40);
    }

    #[test]
    fn test_scanner_config_from_app_config() {
        let mut app = AppConfig::default();
        app.scanner.total_stake = dec!(40);
        app.matching.threshold = 60;

        let config = ScannerConfig::from(&app);
        assert_eq!(config.total_stake, dec!(40));
        assert_eq!(config.matching.threshold, 60);
    }

    // ==================== Scan Tests ====================

    #[test]
    fn test_find_opportunities_strict_single_combination() {
        let (list_a, list_b) = nba_lists();
        let opportunities = find_opportunities(&list_a, &list_b, true);

        assert_eq!(opportunities.len(), 1);
        let opp = &opportunities[0];
        assert_eq!(opp.match_label, "HOU vs DEN");
        assert_eq!(opp.combination, Combination::AwayVsHomeMatch);
        assert_eq!(opp.leg_a.team, "DEN");
        assert_eq!(opp.leg_a.odds, dec!(2.2));
        assert_eq!(opp.leg_a.source, Source::A);
        assert_eq!(opp.leg_b.team, "HOU");
        assert_eq!(opp.leg_b.odds, dec!(2.1));
        assert_eq!(opp.leg_b.source, Source::B);
        assert_eq!(opp.roi_percent, dec!(7.44));
    }

    #[test]
    fn test_opportunity_carries_stake_split() {
        let (list_a, list_b) = nba_lists();
        let scanner =
            OpportunityScanner::with_config(ScannerConfig::default().with_total_stake(dec!(200)));
        let opp = &scanner.find_opportunities(&list_a, &list_b, true)[0];

        let split = opp.stake_split.unwrap();
        assert!((split.stake_a + split.stake_b - dec!(200)).abs() < dec!(0.000001));
        assert!((split.stake_a * dec!(2.2) - split.stake_b * dec!(2.1)).abs() < dec!(0.000001));
        assert!(split.profit > Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_stake_still_reports_opportunity() {
        let (list_a, list_b) = nba_lists();
        let scanner =
            OpportunityScanner::with_config(ScannerConfig::default().with_total_stake(Decimal::ZERO));
        let opportunities = scanner.find_opportunities(&list_a, &list_b, true);

        assert_eq!(opportunities.len(), 1);
        assert!(opportunities[0].stake_split.is_none());
    }

    #[test]
    fn test_both_combinations_in_order() {
        let list_a = vec![quote_a("HOU", dec!(2.6)), quote_a("DEN", dec!(2.6))];
        let list_b = vec![quote_b("DEN", dec!(2.5)), quote_b("HOU", dec!(2.5))];
        let opportunities = find_opportunities(&list_a, &list_b, true);

        assert_eq!(opportunities.len(), 2);
        assert_eq!(opportunities[0].combination, Combination::HomeVsAwayMatch);
        assert_eq!(opportunities[0].leg_a.team, "HOU");
        assert_eq!(opportunities[0].leg_b.team, "DEN");
        assert_eq!(opportunities[1].combination, Combination::AwayVsHomeMatch);
    }

    #[test]
    fn test_suspended_legs_are_skipped() {
        let list_a = vec![
            quote_a("HOU", dec!(2.6)),
            OddsQuote::suspended("DEN", Source::A),
        ];
        let list_b = vec![quote_b("HOU", dec!(2.5)), quote_b("DEN", dec!(2.5))];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].leg_a.team, "HOU");
        assert_eq!(report.summary.skipped_combinations, 1);
        assert_eq!(report.summary.combinations_evaluated, 1);
    }

    #[test]
    fn test_suspended_source_b_leg_is_skipped() {
        let list_a = vec![quote_a("HOU", dec!(2.6)), quote_a("DEN", dec!(2.6))];
        let list_b = vec![
            OddsQuote::suspended("HOU", Source::B),
            quote_b("DEN", dec!(2.5)),
        ];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].leg_a.team, "HOU");
        assert_eq!(report.opportunities[0].leg_b.team, "DEN");
        assert_eq!(report.summary.pairs_matched, 1);
        assert_eq!(report.summary.skipped_combinations, 1);
        assert_eq!(report.summary.combinations_evaluated, 1);
    }

    #[test]
    fn test_invalid_numeric_odds_are_skipped() {
        let list_a = vec![quote_a("HOU", dec!(1.0)), quote_a("DEN", dec!(0))];
        let list_b = vec![quote_b("HOU", dec!(50)), quote_b("DEN", dec!(50))];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert!(report.opportunities.is_empty());
        assert_eq!(report.summary.skipped_combinations, 2);
    }

    #[test]
    fn test_unmatched_fixture_is_skipped() {
        let list_a = vec![quote_a("HOU", dec!(3)), quote_a("DEN", dec!(3))];
        let list_b = vec![quote_b("HOU", dec!(3))];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert!(report.opportunities.is_empty());
        assert_eq!(report.summary.pairs_scanned, 1);
        assert_eq!(report.summary.pairs_matched, 0);
        assert_eq!(report.summary.unmatched_teams, 1);
    }

    #[test]
    fn test_same_b_entry_for_both_teams_is_ambiguous() {
        let list_a = vec![quote_a("Team Liquid", dec!(3)), quote_a("Liquid", dec!(3))];
        let list_b = vec![quote_b("Team Liquid", dec!(3))];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, false);
        assert!(report.opportunities.is_empty());
        assert_eq!(report.summary.ambiguous_pairs, 1);
    }

    #[test]
    fn test_odd_length_list_drops_trailing_entry() {
        let (mut list_a, list_b) = nba_lists();
        list_a.push(quote_a("LAL", dec!(5)));

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert_eq!(report.summary.pairs_scanned, 1);
        assert!(report.summary.trailing_unpaired);
        assert_eq!(report.opportunities.len(), 1);
    }

    #[test]
    fn test_empty_lists() {
        assert!(find_opportunities(&[], &[], false).is_empty());
        let (list_a, _) = nba_lists();
        assert!(find_opportunities(&list_a, &[], false).is_empty());
    }

    #[test]
    fn test_relaxed_matching_across_formats() {
        let list_a = vec![quote_a("NaVi", dec!(2.3)), quote_a("Team Vitality", dec!(1.6))];
        let list_b = vec![
            quote_b("VITALITY", dec!(2.4)),
            quote_b("NaVi Monster Energy", dec!(1.55)),
        ];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, false);
        assert_eq!(report.summary.pairs_matched, 1);
        assert_eq!(report.opportunities.len(), 1);
        let opp = &report.opportunities[0];
        assert_eq!(opp.leg_a.team, "NaVi");
        assert_eq!(opp.leg_b.team, "VITALITY");

        // Strict mode finds nothing for the same lists.
        let strict = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert_eq!(strict.summary.unmatched_teams, 2);
    }

    #[test]
    fn test_summary_best_roi() {
        let list_a = vec![
            quote_a("HOU", dec!(2.6)),
            quote_a("DEN", dec!(2.6)),
            quote_a("LAL", dec!(3.0)),
            quote_a("BOS", dec!(1.2)),
        ];
        let list_b = vec![
            quote_b("HOU", dec!(2.5)),
            quote_b("DEN", dec!(2.5)),
            quote_b("LAL", dec!(1.1)),
            quote_b("BOS", dec!(3.0)),
        ];

        let report = OpportunityScanner::new().scan(&list_a, &list_b, true);
        assert_eq!(report.summary.pairs_scanned, 2);
        assert_eq!(report.summary.opportunities, 3);
        // LAL @ 3.0 vs BOS @ 3.0 => 50%
        assert_eq!(report.summary.best_roi_percent, Some(dec!(50)));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let (list_a, list_b) = nba_lists();
        let scanner = OpportunityScanner::new();

        let first = scanner.scan(&list_a, &list_b, false);
        let second = scanner.scan(&list_a, &list_b, false);
        assert_eq!(first, second);
    }
}
