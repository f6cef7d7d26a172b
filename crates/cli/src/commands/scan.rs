//! One-shot scan of two scraped quote files.
//!
//! ## Example Usage
//!
//! ```bash
//! # Relaxed matching with the configured stake
//! oddsarb scan --a data/site_a.json --b data/site_b.json
//!
//! # Exact labels only, 250 split across both legs, machine-readable output
//! oddsarb scan --a a.csv --b b.csv --strict --stake 250 --json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use oddsarb_arbitrage::{OpportunityScanner, ScanReport, ScannerConfig, Source};
use oddsarb_core::{AppConfig, ConfigLoader};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::commands::input::load_quotes;

/// Command-line overrides layered on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanOverrides {
    /// Require exact team-label equality across sources
    #[arg(long)]
    pub strict: bool,

    /// Total stake to split across both legs
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Minimum fuzzy-match score for a candidate to be accepted
    #[arg(long)]
    pub threshold: Option<u32>,
}

impl ScanOverrides {
    /// Applies the overrides that were given; `--strict` can only switch strict mode on.
    #[must_use]
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if self.strict {
            config.scanner.strict_match = true;
        }
        if let Some(stake) = self.stake {
            config.scanner.total_stake = stake;
        }
        if let Some(threshold) = self.threshold {
            config.matching.threshold = threshold;
        }
        config
    }
}

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Quote file scraped from source A, ordered as (home, away) pairs
    #[arg(long)]
    pub a: PathBuf,

    /// Quote file scraped from source B
    #[arg(long)]
    pub b: PathBuf,

    #[command(flatten)]
    pub overrides: ScanOverrides,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Loads the config file and applies command-line overrides.
pub fn load_config(path: &str, overrides: &ScanOverrides) -> Result<AppConfig> {
    let config = ConfigLoader::load_from(path)
        .with_context(|| format!("Failed to load config from {path}"))?;
    Ok(overrides.apply(config))
}

/// Builds a scanner for `config`, returning it with the strict flag to scan with.
pub fn build_scanner(config: &AppConfig) -> (OpportunityScanner, bool) {
    let scanner = OpportunityScanner::with_config(ScannerConfig::from(config));
    (scanner, config.scanner.strict_match)
}

pub fn run_scan(args: ScanArgs) -> Result<()> {
    let config = load_config(&args.config, &args.overrides)?;

    tracing::info!("=== Odds Scan ===");
    tracing::info!("Source A: {}", args.a.display());
    tracing::info!("Source B: {}", args.b.display());
    tracing::info!("Strict match: {}", config.scanner.strict_match);
    tracing::info!("Total stake: {}", config.scanner.total_stake);
    tracing::info!("Match threshold: {}", config.matching.threshold);

    let list_a = load_quotes(&args.a, Source::A)?;
    let list_b = load_quotes(&args.b, Source::B)?;

    let (scanner, strict) = build_scanner(&config);
    let report = scanner.scan(&list_a, &list_b, strict);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ScanReport) {
    if report.opportunities.is_empty() {
        println!("No arbitrage opportunities found.");
    }
    for opportunity in &report.opportunities {
        println!("{opportunity}");
        for leg in [&opportunity.leg_a, &opportunity.leg_b] {
            if let Some(link) = &leg.link {
                println!("    {} ({}): {}", leg.team, leg.source, link);
            }
        }
    }

    let summary = &report.summary;
    println!();
    println!(
        "Fixtures: {} scanned, {} matched | unmatched teams: {} | ambiguous: {}",
        summary.pairs_scanned, summary.pairs_matched, summary.unmatched_teams, summary.ambiguous_pairs
    );
    println!(
        "Combinations: {} evaluated, {} skipped | opportunities: {}",
        summary.combinations_evaluated, summary.skipped_combinations, summary.opportunities
    );
    if let Some(best) = summary.best_roi_percent {
        println!("Best ROI: {}%", best.round_dp(2));
    }
    if summary.trailing_unpaired {
        println!("Note: source A had an odd number of entries; the last one was ignored.");
    }
}
