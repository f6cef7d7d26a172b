use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
///
/// Every section falls back to its defaults, so an empty `Config.toml` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scanner: ScannerSettings,
    pub matching: MatchingConfig,
    pub watch: WatchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    /// Require exact team-label equality instead of fuzzy matching.
    pub strict_match: bool,
    /// Total stake split across both legs of an opportunity.
    pub total_stake: Decimal,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            strict_match: false,
            total_stake: Decimal::ONE_HUNDRED,
        }
    }
}

/// Tunable parameters of the relaxed name matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum cumulative score a candidate needs to be accepted.
    pub threshold: u32,
    pub weights: WeightSettings,
    /// Tokens marking a reserve or academy squad of a parent team.
    ///
    /// Each inner list is one squad written different ways ("W", "WOMEN").
    pub squad_qualifiers: Vec<Vec<String>>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 40,
            weights: WeightSettings::default(),
            squad_qualifiers: default_squad_qualifiers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSettings {
    pub substring: u32,
    pub first_token: u32,
    pub token_overlap: u32,
    pub long_token_bonus: u32,
    pub ticker_stripped: u32,
    pub acronym: u32,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            substring: 60,
            first_token: 30,
            token_overlap: 20,
            long_token_bonus: 20,
            ticker_stripped: 45,
            acronym: 45,
        }
    }
}

/// Settings for the polling `watch` loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub source_a: String,
    pub source_b: String,
    pub poll_interval_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            source_a: "data/source_a.json".to_string(),
            source_b: "data/source_b.json".to_string(),
            poll_interval_secs: 5,
        }
    }
}

fn default_squad_qualifiers() -> Vec<Vec<String>> {
    let groups: [&[&str]; 7] = [
        &["ACADEMY", "ACAD"],
        &["YOUTH", "JUNIORS", "JR"],
        &["RESERVES", "II", "B"],
        &["U19"],
        &["U21"],
        &["U23"],
        &["WOMEN", "W", "FE"],
    ];
    groups
        .iter()
        .map(|group| group.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(!config.scanner.strict_match);
        assert_eq!(config.scanner.total_stake, dec!(100));
        assert_eq!(config.matching.threshold, 40);
        assert_eq!(config.matching.weights.substring, 60);
        assert_eq!(config.watch.poll_interval_secs, 5);
        assert!(config
            .matching
            .squad_qualifiers
            .iter()
            .any(|group| group.iter().any(|q| q == "ACADEMY")));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{ "scanner": { "strict_match": true }, "matching": { "threshold": 55 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.scanner.strict_match);
        assert_eq!(config.scanner.total_stake, dec!(100));
        assert_eq!(config.matching.threshold, 55);
        assert_eq!(config.matching.weights, WeightSettings::default());
        assert_eq!(config.watch, WatchSettings::default());
    }
}
