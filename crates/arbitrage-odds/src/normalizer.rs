//! Team-name canonicalization.
//!
//! Both bookmakers render the same team differently ("NaVi", "Natus Vincere",
//! "navi.", "G2 Esports"). Relaxed matching works on a canonical form made of
//! uppercase ASCII letters, digits, and single spaces.

use serde::{Deserialize, Serialize};

/// Longest leading token treated as a ticker or sponsor prefix.
pub const MAX_TICKER_LEN: usize = 5;

/// How team labels are compared across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Raw labels must be byte-for-byte equal.
    Strict,
    /// Labels are normalized and fuzzily scored.
    #[default]
    Relaxed,
}

impl MatchMode {
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Relaxed
        }
    }

    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Canonicalizes a team label.
///
/// Strict mode returns the label untouched. Relaxed mode uppercases, turns any
/// whitespace into a space, drops everything outside `[A-Z0-9 ]`, and collapses
/// space runs. Idempotent in both modes.
#[must_use]
pub fn normalize(raw: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Strict => raw.to_string(),
        MatchMode::Relaxed => {
            let filtered: String = raw
                .to_uppercase()
                .chars()
                .filter_map(|c| {
                    if c.is_whitespace() {
                        Some(' ')
                    } else if c.is_ascii_uppercase() || c.is_ascii_digit() {
                        Some(c)
                    } else {
                        None
                    }
                })
                .collect();
            filtered.split_whitespace().collect::<Vec<_>>().join(" ")
        }
    }
}

/// Splits a normalized name into tokens.
pub fn tokens(name: &str) -> impl Iterator<Item = &str> {
    name.split(' ').filter(|t| !t.is_empty())
}

/// Drops a short leading token such as an org tag or sponsor ("TEAM", "FC", "NAVI").
///
/// Returns `None` when the name has a single token or the first token is longer
/// than [`MAX_TICKER_LEN`].
#[must_use]
pub fn strip_ticker(name: &str) -> Option<&str> {
    let (first, rest) = name.split_once(' ')?;
    let rest = rest.trim_start();
    if first.len() <= MAX_TICKER_LEN && !rest.is_empty() {
        Some(rest)
    } else {
        None
    }
}

/// Removes spaces, for character-level comparisons.
#[must_use]
pub fn compact(name: &str) -> String {
    name.chars().filter(|c| *c != ' ').collect()
}
