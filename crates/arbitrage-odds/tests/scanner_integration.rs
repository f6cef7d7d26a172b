//! Integration tests for the odds arbitrage engine.
//!
//! These tests drive the public API the way a scrape tick does:
//! - JSON quote lists as emitted by the two site scrapers
//! - Strict and relaxed matching over inconsistently formatted labels
//! - Stake splits with equal payout on either outcome
//! - Repeated scans over unchanged input

use oddsarb_arbitrage::{
    calculate, calculate_stakes, find_match, find_opportunities, Combination, MatchConfig,
    OddsQuote, OpportunityScanner, ScannerConfig, Source,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_quotes(json: &str) -> Vec<OddsQuote> {
    serde_json::from_str(json).expect("valid quote JSON")
}

/// Site A esports board: consecutive (home, away) rows, one suspended.
fn esports_site_a() -> Vec<OddsQuote> {
    parse_quotes(
        r#"[
            {"team": "NaVi", "odds": 2.30, "source": "A", "link": "row-1-home"},
            {"team": "Team Vitality", "odds": "1.60", "source": "A", "link": "row-1-away"},
            {"team": "G2", "odds": 1.45, "source": "A"},
            {"team": "FaZe Clan", "odds": "Suspended", "source": "A"},
            {"team": "Team Liquid", "odds": 3.60, "source": "A"},
            {"team": "Heroic", "odds": 1.36, "source": "A"}
        ]"#,
    )
}

/// Site B board for the same fixtures, differently labelled and ordered.
fn esports_site_b() -> Vec<OddsQuote> {
    parse_quotes(
        r#"[
            {"team": "G2 Academy", "odds": 4.00, "source": "B"},
            {"team": "VITALITY", "odds": 2.40, "source": "B"},
            {"team": "NaVi Monster Energy", "odds": 1.55, "source": "B"},
            {"team": "HEROIC", "odds": "1,40", "source": "B"},
            {"team": "Liquid", "odds": 3.00, "source": "B"},
            {"team": "FaZe", "odds": 2.90, "source": "B"}
        ]"#,
    )
}

// =============================================================================
// Calculator Properties
// =============================================================================

#[test]
fn test_even_money_is_not_arbitrage() {
    assert!(!calculate(dec!(2.0), dec!(2.0)).is_arb);
}

#[test]
fn test_two_and_half_both_sides() {
    let check = calculate(dec!(2.5), dec!(2.5));
    assert!(check.is_arb);
    assert_eq!(check.roi_percent, dec!(25));

    let split = calculate_stakes(dec!(100), dec!(2.5), dec!(2.5)).unwrap();
    assert_eq!(split.stake_a, dec!(50));
    assert_eq!(split.stake_b, dec!(50));
    assert_eq!(split.total_return, dec!(125));
    assert_eq!(split.profit, dec!(25));
}

#[test]
fn test_stake_split_equal_payout_grid() {
    let totals = [dec!(1), dec!(100), dec!(12345.67)];
    let odds = [dec!(1.01), dec!(1.5), dec!(2.05), dec!(3.75), dec!(26)];

    for total in totals {
        for a in odds {
            for b in odds {
                let split = calculate_stakes(total, a, b).unwrap();
                let diff = (split.stake_a * a - split.stake_b * b).abs();
                assert!(diff < dec!(0.000001), "{total} @ {a}/{b}: diff {diff}");
            }
        }
    }
}

// =============================================================================
// Matcher Properties
// =============================================================================

#[test]
fn test_find_match_on_empty_list() {
    assert!(find_match(&[], "ANY", false).is_none());
}

#[test]
fn test_academy_roster_is_not_the_main_roster() {
    let candidates = vec![OddsQuote::new("G2 Academy", dec!(2.0), Source::B)];
    assert!(find_match(&candidates, "G2", false).is_none());
}

#[test]
fn test_sponsor_suffix_still_matches() {
    let candidates = vec![OddsQuote::new("NaVi Monster Energy", dec!(2.0), Source::B)];
    let found = find_match(&candidates, "NaVi", false).unwrap();
    assert_eq!(found.team, "NaVi Monster Energy");
}

// =============================================================================
// Scanner Scenarios
// =============================================================================

#[test]
fn test_strict_scan_emits_single_cross_combination() {
    let list_a = vec![
        OddsQuote::new("HOU", dec!(1.8), Source::A),
        OddsQuote::new("DEN", dec!(2.2), Source::A),
    ];
    let list_b = vec![
        OddsQuote::new("HOU", dec!(2.1), Source::B),
        OddsQuote::new("DEN", dec!(1.75), Source::B),
    ];

    let opportunities = find_opportunities(&list_a, &list_b, true);

    assert_eq!(opportunities.len(), 1);
    let opp = &opportunities[0];
    assert_eq!(opp.combination, Combination::AwayVsHomeMatch);
    assert_eq!((opp.leg_a.team.as_str(), opp.leg_a.odds), ("DEN", dec!(2.2)));
    assert_eq!((opp.leg_b.team.as_str(), opp.leg_b.odds), ("HOU", dec!(2.1)));
    assert!((opp.roi_exact - dec!(7.44)).abs() < dec!(0.01));
}

#[test]
fn test_relaxed_scan_over_esports_boards() {
    let scanner = OpportunityScanner::new();
    let report = scanner.scan(&esports_site_a(), &esports_site_b(), false);

    // G2 finds no main-roster match, so its fixture is skipped.
    assert_eq!(report.summary.pairs_scanned, 3);
    assert_eq!(report.summary.pairs_matched, 2);
    assert_eq!(report.summary.unmatched_teams, 1);

    let teams: Vec<(&str, &str)> = report
        .opportunities
        .iter()
        .map(|o| (o.leg_a.team.as_str(), o.leg_b.team.as_str()))
        .collect();
    // NaVi 2.30 / VITALITY 2.40 and Liquid 3.60 / HEROIC 1.40.
    assert_eq!(teams, [("NaVi", "VITALITY"), ("Team Liquid", "HEROIC")]);

    let navi = &report.opportunities[0];
    assert_eq!(navi.leg_a.link.as_deref(), Some("row-1-home"));
    assert_eq!(navi.match_label, "NaVi vs Team Vitality");
    assert!(navi.roi_percent > Decimal::ZERO);
}

#[test]
fn test_strict_scan_over_esports_boards_finds_nothing() {
    let report = OpportunityScanner::new().scan(&esports_site_a(), &esports_site_b(), true);
    assert!(report.opportunities.is_empty());
    assert_eq!(report.summary.pairs_matched, 0);
}

#[test]
fn test_higher_threshold_rejects_weak_matches() {
    let config = ScannerConfig {
        matching: MatchConfig::default().with_threshold(500),
        ..ScannerConfig::default()
    };
    let report = OpportunityScanner::with_config(config).scan(
        &esports_site_a(),
        &esports_site_b(),
        false,
    );
    assert!(report.opportunities.is_empty());
    assert_eq!(report.summary.unmatched_teams, 6);
}

#[test]
fn test_repeated_scans_are_identical() {
    let scanner = OpportunityScanner::new();
    let a = esports_site_a();
    let b = esports_site_b();

    let first = scanner.find_opportunities(&a, &b, false);
    let second = scanner.find_opportunities(&a, &b, false);
    assert_eq!(first, second);
}

#[test]
fn test_opportunity_json_shape() {
    let scanner = OpportunityScanner::new();
    let opportunities = scanner.find_opportunities(&esports_site_a(), &esports_site_b(), false);
    let value = serde_json::to_value(&opportunities[0]).unwrap();

    assert_eq!(value["match_label"], "NaVi vs Team Vitality");
    assert_eq!(value["leg_a"]["source"], "A");
    assert_eq!(value["leg_b"]["source"], "B");
    assert_eq!(value["combination"], "HomeVsAwayMatch");
    assert!(value["stake_split"]["stake_a"].is_string());
}
