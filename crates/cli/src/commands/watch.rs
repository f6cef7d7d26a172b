//! Polling scan loop over live scraper output.
//!
//! Re-reads both quote files every poll interval and scans them. Only
//! opportunities absent from the previous tick are reported, so a price that
//! stays open is announced once. Edits to the config file (strict toggle,
//! stake, matcher weights) are picked up without a restart.
//!
//! ## Example Usage
//!
//! ```bash
//! # Sources and interval from the [watch] config section
//! oddsarb watch
//!
//! # Explicit files, polling every 2 seconds
//! oddsarb watch --a live/a.json --b live/b.json --interval 2
//! ```

use anyhow::Result;
use clap::Args;
use oddsarb_arbitrage::{OddsQuote, Opportunity, OpportunityScanner, Source};
use oddsarb_core::{AppConfig, ConfigWatcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::commands::input::load_quotes;
use crate::commands::scan::{build_scanner, load_config, ScanOverrides};

/// Arguments for the watch command.
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Quote file for source A (defaults to `watch.source_a`)
    #[arg(long)]
    pub a: Option<PathBuf>,

    /// Quote file for source B (defaults to `watch.source_b`)
    #[arg(long)]
    pub b: Option<PathBuf>,

    /// Poll interval in seconds (defaults to `watch.poll_interval_secs`)
    #[arg(long)]
    pub interval: Option<u64>,

    #[command(flatten)]
    pub overrides: ScanOverrides,

    /// Config file path, watched for changes
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Scanner state rebuilt whenever the configuration changes.
struct WatchState {
    source_a: PathBuf,
    source_b: PathBuf,
    poll_secs: u64,
    scanner: OpportunityScanner,
    strict: bool,
}

impl WatchState {
    fn new(args: &WatchArgs, config: &AppConfig) -> Self {
        let (scanner, strict) = build_scanner(config);
        Self {
            source_a: args
                .a
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.watch.source_a)),
            source_b: args
                .b
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.watch.source_b)),
            poll_secs: args.interval.unwrap_or(config.watch.poll_interval_secs).max(1),
            scanner,
            strict,
        }
    }

    fn ticker(&self) -> Interval {
        let mut ticker = interval(Duration::from_secs(self.poll_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }
}

/// Tracks which opportunities were already reported on the previous tick.
#[derive(Debug, Default)]
pub struct OpportunityTracker {
    previous: HashSet<String>,
}

impl OpportunityTracker {
    /// Returns the opportunities not present last time and remembers this tick's set.
    ///
    /// An opportunity that disappears and later comes back is reported again.
    pub fn fresh<'a>(&mut self, opportunities: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        let current: HashSet<String> = opportunities.iter().map(Opportunity::key).collect();
        let fresh = opportunities
            .iter()
            .filter(|opp| !self.previous.contains(&opp.key()))
            .collect();
        self.previous = current;
        fresh
    }
}

pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let config = load_config(&args.config, &args.overrides)?;
    let mut state = WatchState::new(&args, &config);

    tracing::info!("=== Odds Watch ===");
    tracing::info!("Source A: {}", state.source_a.display());
    tracing::info!("Source B: {}", state.source_b.display());
    tracing::info!("Poll interval: {}s", state.poll_secs);
    tracing::info!("Strict match: {}", state.strict);
    tracing::info!("Config: {} (hot reload)", args.config);

    let (watcher, mut config_rx) = ConfigWatcher::new(config);
    let config_path = args.config.clone();
    let watch_task = tokio::spawn(async move {
        if let Err(e) = watcher.watch(&config_path).await {
            tracing::warn!(error = %e, "Config watcher stopped; continuing with current config");
        }
    });

    let mut ticker = state.ticker();
    let mut tracker = OpportunityTracker::default();
    let mut config_live = true;
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
            changed = config_rx.changed(), if config_live => {
                if changed.is_err() {
                    config_live = false;
                    continue;
                }
                let reloaded = args.overrides.apply(config_rx.borrow_and_update().clone());
                let poll_secs = state.poll_secs;
                state = WatchState::new(&args, &reloaded);
                if state.poll_secs != poll_secs {
                    ticker = state.ticker();
                }
                tracing::info!(
                    strict = state.strict,
                    total_stake = %state.scanner.config().total_stake,
                    poll_secs = state.poll_secs,
                    "Applied new configuration"
                );
            }
            _ = ticker.tick() => {
                ticks += 1;
                scan_tick(&state, &mut tracker, ticks);
            }
        }
    }

    watch_task.abort();
    tracing::info!(ticks = ticks, "Watch stopped");
    Ok(())
}

fn scan_tick(state: &WatchState, tracker: &mut OpportunityTracker, tick: u64) {
    let (list_a, list_b) = match load_pair(&state.source_a, &state.source_b) {
        Ok(lists) => lists,
        Err(e) => {
            // Scrapers rewrite these files in place; a half-written file is retried next tick.
            tracing::warn!(tick = tick, error = %format!("{e:#}"), "Skipping tick, quote files unreadable");
            return;
        }
    };

    let report = state.scanner.scan(&list_a, &list_b, state.strict);
    for opportunity in tracker.fresh(&report.opportunities) {
        tracing::info!(
            tick = tick,
            key = %opportunity.key(),
            roi_percent = %opportunity.roi_percent,
            "New arbitrage opportunity"
        );
        println!("{opportunity}");
    }
}

fn load_pair(source_a: &Path, source_b: &Path) -> Result<(Vec<OddsQuote>, Vec<OddsQuote>)> {
    Ok((
        load_quotes(source_a, Source::A)?,
        load_quotes(source_b, Source::B)?,
    ))
}
