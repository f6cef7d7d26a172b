//! Explains how a team label is matched against a candidate list.
//!
//! Prints the per-rule score breakdown for every candidate, which is the
//! quickest way to tune `[matching]` weights against real scrapes.

use anyhow::Result;
use clap::Args;
use oddsarb_arbitrage::{FuzzyMatcher, MatchConfig, MatchMode, MatchScore, Source};
use std::path::PathBuf;

use crate::commands::input::load_quotes;
use crate::commands::scan::{load_config, ScanOverrides};

/// Arguments for the match command.
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Team label to look up
    #[arg(long)]
    pub name: String,

    /// Quote file holding the candidate labels
    #[arg(long)]
    pub candidates: PathBuf,

    #[command(flatten)]
    pub overrides: ScanOverrides,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

pub fn run_match(args: MatchArgs) -> Result<()> {
    let config = load_config(&args.config, &args.overrides)?;
    let matcher = FuzzyMatcher::with_config(MatchConfig::from(&config.matching));
    let mode = MatchMode::from_strict(config.scanner.strict_match);
    let candidates = load_quotes(&args.candidates, Source::B)?;

    if !mode.is_strict() {
        println!(
            "Scores for {:?} (threshold {}):",
            args.name,
            matcher.config().threshold
        );
        for (candidate, score) in matcher.score_all(&candidates, &args.name) {
            println!("  {:>4}  {:<32} {}", score.total, candidate.team, describe(&score));
        }
        println!();
    }

    match matcher.find_match(&candidates, &args.name, mode) {
        Some(found) => println!("Match: {} @ {}", found.team, found.odds),
        None => println!("No match for {:?}", args.name),
    }

    Ok(())
}

fn describe(score: &MatchScore) -> String {
    if let Some(qualifier) = &score.vetoed_by {
        return format!("vetoed: {qualifier} on one side only");
    }
    score
        .hits
        .iter()
        .map(|hit| format!("{}+{}", hit.rule, hit.points))
        .collect::<Vec<_>>()
        .join(" ")
}
