//! CLI commands for the odds arbitrage scanner.

pub mod input;
pub mod match_names;
pub mod scan;
pub mod stakes;
pub mod watch;

pub use match_names::{run_match, MatchArgs};
pub use scan::{run_scan, ScanArgs};
pub use stakes::{run_stakes, StakesArgs};
pub use watch::{run_watch, WatchArgs};
