//! Shared configuration for the odds arbitrage scanner.

pub mod config;
pub mod config_loader;
pub mod config_watcher;

pub use config::{AppConfig, MatchingConfig, ScannerSettings, WatchSettings, WeightSettings};
pub use config_loader::ConfigLoader;
pub use config_watcher::ConfigWatcher;
