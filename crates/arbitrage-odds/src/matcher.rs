//! Team matching across bookmakers.
//!
//! Strict mode pairs quotes whose raw labels are identical. Relaxed mode
//! normalizes both labels and sums a table of weighted [`ScoringRule`]s; the
//! best-scoring candidate is accepted if it reaches the configured threshold.
//!
//! The weights and threshold are heuristics, not a calibrated model. They live
//! in [`MatchConfig`] so deployments can tune them.

use oddsarb_core::MatchingConfig;
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::normalizer::{compact, normalize, strip_ticker, tokens, MatchMode};
use crate::types::OddsQuote;

/// Weight table for the relaxed scoring rules.
pub type ScoringWeights = oddsarb_core::WeightSettings;

// =============================================================================
// Match Configuration
// =============================================================================

/// Configuration for relaxed name matching.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Minimum cumulative score for a candidate to be accepted.
    pub threshold: u32,

    /// Points awarded per rule.
    pub weights: ScoringWeights,

    /// Normalized qualifier groups marking a reserve or academy squad.
    ///
    /// Tokens in one group are spellings of the same squad (`["ACADEMY", "ACAD"]`).
    pub squad_qualifiers: Vec<Vec<String>>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::from(&MatchingConfig::default())
    }
}

impl From<&MatchingConfig> for MatchConfig {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            threshold: config.threshold,
            weights: config.weights.clone(),
            squad_qualifiers: config
                .squad_qualifiers
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .map(|q| normalize(q, MatchMode::Relaxed))
                        .filter(|q| !q.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|group| !group.is_empty())
                .collect(),
        }
    }
}

impl MatchConfig {
    /// Sets the acceptance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replaces the rule weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Disables the reserve/academy squad veto.
    #[must_use]
    pub fn without_squad_qualifiers(mut self) -> Self {
        self.squad_qualifiers.clear();
        self
    }
}

// =============================================================================
// Scoring Rules
// =============================================================================

/// Two normalized labels under comparison.
#[derive(Debug, Clone, Copy)]
pub struct NamePair<'a> {
    pub candidate: &'a str,
    pub target: &'a str,
}

impl<'a> NamePair<'a> {
    #[must_use]
    pub fn new(candidate: &'a str, target: &'a str) -> Self {
        Self { candidate, target }
    }

    /// Returns `(shorter, longer)` by character count ignoring spaces; ties keep candidate first.
    #[must_use]
    pub fn by_length(&self) -> (&'a str, &'a str) {
        if compact(self.target).len() < compact(self.candidate).len() {
            (self.target, self.candidate)
        } else {
            (self.candidate, self.target)
        }
    }

    /// Distinct candidate tokens longer than two characters that also occur in the target.
    #[must_use]
    pub fn shared_tokens(&self) -> Vec<&'a str> {
        let target: HashSet<&str> = tokens(self.target).collect();
        let mut seen = HashSet::new();
        tokens(self.candidate)
            .filter(|t| t.len() > 2 && target.contains(t) && seen.insert(*t))
            .collect()
    }
}

/// Returns how many times a rule's weight is earned for a pair.
pub type RulePredicate = fn(&NamePair<'_>) -> u32;

/// A named, weighted heuristic.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    pub name: &'static str,
    pub weight: u32,
    pub predicate: RulePredicate,
}

impl ScoringRule {
    #[must_use]
    pub fn new(name: &'static str, weight: u32, predicate: RulePredicate) -> Self {
        Self {
            name,
            weight,
            predicate,
        }
    }

    /// Points this rule contributes for the pair.
    #[must_use]
    pub fn score(&self, pair: &NamePair<'_>) -> u32 {
        self.weight.saturating_mul((self.predicate)(pair))
    }
}

/// One side contains the other.
#[must_use]
pub fn substring_containment(pair: &NamePair<'_>) -> u32 {
    let (a, b) = (pair.candidate, pair.target);
    u32::from(a.contains(b) || b.contains(a))
}

/// Both names start with the same token of at least three characters.
#[must_use]
pub fn first_token_prefix(pair: &NamePair<'_>) -> u32 {
    match (tokens(pair.candidate).next(), tokens(pair.target).next()) {
        (Some(a), Some(b)) => u32::from(a.len() >= 3 && a == b),
        _ => 0,
    }
}

/// One unit per shared token longer than two characters.
#[must_use]
pub fn shared_token_count(pair: &NamePair<'_>) -> u32 {
    u32::try_from(pair.shared_tokens().len()).unwrap_or(u32::MAX)
}

/// At least one shared token is longer than three characters.
#[must_use]
pub fn long_shared_token(pair: &NamePair<'_>) -> u32 {
    u32::from(pair.shared_tokens().iter().any(|t| t.len() > 3))
}

/// Equal or contained once a short leading ticker/sponsor token is dropped.
#[must_use]
pub fn ticker_stripped_match(pair: &NamePair<'_>) -> u32 {
    let related = |a: &str, b: &str| a == b || a.contains(b) || b.contains(a);
    let candidate = strip_ticker(pair.candidate);
    let target = strip_ticker(pair.target);

    let hit = candidate.is_some_and(|c| related(c, pair.target))
        || target.is_some_and(|t| related(pair.candidate, t))
        || matches!((candidate, target), (Some(c), Some(t)) if related(c, t));
    u32::from(hit)
}

/// The shorter name's characters appear, in order, within the longer name.
#[must_use]
pub fn acronym_match(pair: &NamePair<'_>) -> u32 {
    let (shorter, longer) = pair.by_length();
    let shorter = compact(shorter);
    if shorter.len() < 2 {
        return 0;
    }
    let mut remaining = compact(longer).into_bytes().into_iter();
    let hit = shorter
        .bytes()
        .all(|needle| remaining.any(|c| c == needle));
    u32::from(hit)
}

/// Builds the default rule table from a weight set.
#[must_use]
pub fn default_rules(weights: &ScoringWeights) -> Vec<ScoringRule> {
    vec![
        ScoringRule::new("substring", weights.substring, substring_containment),
        ScoringRule::new("first_token", weights.first_token, first_token_prefix),
        ScoringRule::new("token_overlap", weights.token_overlap, shared_token_count),
        ScoringRule::new("long_token_bonus", weights.long_token_bonus, long_shared_token),
        ScoringRule::new("ticker_stripped", weights.ticker_stripped, ticker_stripped_match),
        ScoringRule::new("acronym", weights.acronym, acronym_match),
    ]
}

// =============================================================================
// Match Scores
// =============================================================================

/// Points awarded by a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: &'static str,
    pub points: u32,
}

/// Explainable result of scoring one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchScore {
    /// Sum of all rule points; zero when vetoed.
    pub total: u32,
    /// Rules that awarded points, in table order.
    pub hits: Vec<RuleHit>,
    /// Squad qualifier present on only one side, if any.
    pub vetoed_by: Option<String>,
}

impl MatchScore {
    fn vetoed(qualifier: String) -> Self {
        Self {
            total: 0,
            hits: Vec::new(),
            vetoed_by: Some(qualifier),
        }
    }
}

// =============================================================================
// Fuzzy Matcher
// =============================================================================

/// Pairs team labels from one source with quotes from the other.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: MatchConfig,
    rules: Vec<ScoringRule>,
}

impl FuzzyMatcher {
    /// Creates a matcher with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MatchConfig::default())
    }

    /// Creates a matcher with custom configuration.
    #[must_use]
    pub fn with_config(config: MatchConfig) -> Self {
        let rules = default_rules(&config.weights);
        Self { config, rules }
    }

    /// Appends an extra rule to the table.
    #[must_use]
    pub fn with_rule(mut self, rule: ScoringRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the scoring rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Scores a candidate label against a target label in relaxed mode.
    #[must_use]
    pub fn score(&self, candidate: &str, target: &str) -> MatchScore {
        let candidate = normalize(candidate, MatchMode::Relaxed);
        let target = normalize(target, MatchMode::Relaxed);
        self.score_normalized(&candidate, &target)
    }

    fn score_normalized(&self, candidate: &str, target: &str) -> MatchScore {
        if candidate.is_empty() || target.is_empty() {
            return MatchScore::default();
        }

        if let Some(qualifier) = self.squad_mismatch(candidate, target) {
            return MatchScore::vetoed(qualifier);
        }

        let pair = NamePair::new(candidate, target);
        let hits: Vec<RuleHit> = self
            .rules
            .iter()
            .map(|rule| RuleHit {
                rule: rule.name,
                points: rule.score(&pair),
            })
            .filter(|hit| hit.points > 0)
            .collect();
        let total = hits
            .iter()
            .fold(0u32, |acc, hit| acc.saturating_add(hit.points));

        MatchScore {
            total,
            hits,
            vetoed_by: None,
        }
    }

    /// Returns a qualifier whose group appears on exactly one of the names.
    ///
    /// "G2" and "G2 ACADEMY" share every token of the shorter name, yet they are
    /// different rosters with independent odds. "ARSENAL W" and "ARSENAL WOMEN"
    /// name the same squad, so spellings within a group count as equal.
    fn squad_mismatch(&self, candidate: &str, target: &str) -> Option<String> {
        if self.config.squad_qualifiers.is_empty() {
            return None;
        }
        let candidate: HashSet<&str> = tokens(candidate).collect();
        let target: HashSet<&str> = tokens(target).collect();
        self.config.squad_qualifiers.iter().find_map(|group| {
            let in_candidate = group.iter().find(|q| candidate.contains(q.as_str()));
            let in_target = group.iter().find(|q| target.contains(q.as_str()));
            match (in_candidate, in_target) {
                (Some(q), None) | (None, Some(q)) => Some(q.clone()),
                _ => None,
            }
        })
    }

    /// Scores every candidate against `name`, in candidate order.
    #[must_use]
    pub fn score_all<'a>(
        &self,
        candidates: &'a [OddsQuote],
        name: &str,
    ) -> Vec<(&'a OddsQuote, MatchScore)> {
        let target = normalize(name, MatchMode::Relaxed);
        candidates
            .iter()
            .map(|candidate| {
                let candidate_name = normalize(&candidate.team, MatchMode::Relaxed);
                (candidate, self.score_normalized(&candidate_name, &target))
            })
            .collect()
    }

    /// Finds the quote in `candidates` that denotes the same team as `name`.
    ///
    /// Strict mode returns the first quote whose raw label equals `name`.
    /// Relaxed mode returns the highest-scoring quote if it reaches the
    /// threshold; on ties the earliest candidate wins. `None` is a normal
    /// "no match" result.
    #[must_use]
    pub fn find_match<'a>(
        &self,
        candidates: &'a [OddsQuote],
        name: &str,
        mode: MatchMode,
    ) -> Option<&'a OddsQuote> {
        if mode.is_strict() {
            return candidates.iter().find(|candidate| candidate.team == name);
        }

        let mut best: Option<(&OddsQuote, u32)> = None;
        for (candidate, score) in self.score_all(candidates, name) {
            trace!(
                name = %name,
                candidate = %candidate.team,
                score = score.total,
                vetoed_by = ?score.vetoed_by,
                "Scored match candidate"
            );
            if best.map_or(true, |(_, top)| score.total > top) {
                best = Some((candidate, score.total));
            }
        }

        match best {
            Some((candidate, score)) if score >= self.config.threshold => {
                debug!(
                    name = %name,
                    matched = %candidate.team,
                    score = score,
                    "Team match found"
                );
                Some(candidate)
            }
            Some((candidate, score)) => {
                debug!(
                    name = %name,
                    best_candidate = %candidate.team,
                    score = score,
                    threshold = self.config.threshold,
                    "Best candidate below threshold"
                );
                None
            }
            None => None,
        }
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds a match with the default configuration.
#[must_use]
pub fn find_match<'a>(
    candidates: &'a [OddsQuote],
    name: &str,
    strict: bool,
) -> Option<&'a OddsQuote> {
    FuzzyMatcher::new().find_match(candidates, name, MatchMode::from_strict(strict))
}
