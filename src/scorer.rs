//! Intensity scoring.
//!
//! A language's intensity blends three log/sqrt-damped signals:
//!
//! | Signal | Formula | Cap | Weight |
//! |--------|---------|-----|--------|
//! | Volume | `log10(max(lines, 1)) * 15` | 50 | 0.40 |
//! | Commits | `log10(max(commits, 1)) * 20` | 40 | 0.35 |
//! | Repositories | `sqrt(repos) * 8` | 30 | 0.25 |
//!
//! The blended base is optionally discounted by staleness
//! (`0.7 + 0.3 * exp(-months / 36)`, never below 70%), then multiplied by the
//! language's complexity factor and capped at 100.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Bytes assumed per line of code.
pub const BYTES_PER_LINE: u64 = 50;

/// Upper bound for any score.
pub const MAX_INTENSITY: f64 = 100.0;

const VOLUME_CAP: f64 = 50.0;
const COMMIT_CAP: f64 = 40.0;
const REPOSITORY_CAP: f64 = 30.0;

const VOLUME_WEIGHT: f64 = 0.4;
const COMMIT_WEIGHT: f64 = 0.35;
const REPOSITORY_WEIGHT: f64 = 0.25;

const TIME_WEIGHT_FLOOR: f64 = 0.7;
const TIME_WEIGHT_SPAN: f64 = 0.3;
const TIME_DECAY_MONTHS: f64 = 36.0;

/// Estimated lines of code for a byte count.
pub fn line_count(total_bytes: u64) -> u64 {
    total_bytes / BYTES_PER_LINE
}

/// Round to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-language complexity multipliers.
///
/// Languages not in the table get [`ComplexityTable::DEFAULT_FACTOR`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityTable {
    factors: FxHashMap<String, f64>,
}

impl ComplexityTable {
    /// Factor for languages missing from the table.
    pub const DEFAULT_FACTOR: f64 = 1.0;

    /// Built-in table.
    pub fn standard() -> Self {
        let factors = [
            ("Assembly", 1.5),
            ("C++", 1.4),
            ("Rust", 1.3),
            ("C", 1.3),
            ("Java", 1.2),
            ("C#", 1.2),
            ("Go", 1.1),
            ("TypeScript", 1.1),
            ("Python", 1.0),
            ("JavaScript", 1.0),
            ("PHP", 0.9),
            ("Ruby", 0.9),
            ("CSS", 0.6),
            ("HTML", 0.5),
            ("XML", 0.4),
            ("Markdown", 0.3),
            ("YAML", 0.3),
            ("JSON", 0.2),
        ]
        .into_iter()
        .map(|(language, factor)| (language.to_string(), factor))
        .collect();
        Self { factors }
    }

    /// Add or replace entries.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a f64)>,
    ) -> Self {
        for (language, factor) in overrides {
            self.factors.insert(language.clone(), *factor);
        }
        self
    }

    /// Complexity factor for a language.
    pub fn factor(&self, language: &str) -> f64 {
        self.factors
            .get(language)
            .copied()
            .unwrap_or(Self::DEFAULT_FACTOR)
    }
}

impl Default for ComplexityTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Aggregated stats for one language, as handed to the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput<'a> {
    /// Language name, used for the complexity lookup.
    pub language: &'a str,
    /// Bytes across all repositories.
    pub total_bytes: u64,
    /// Commits credited to the language.
    pub commit_count: u64,
    /// Repositories containing the language.
    pub repository_count: u64,
    /// Months since the newest dated commit, a staleness measure rather than
    /// a project span. `None` disables time weighting.
    pub months_since_activity: Option<f64>,
}

impl<'a> ScoreInput<'a> {
    /// Unweighted input for one language.
    pub fn new(
        language: &'a str,
        total_bytes: u64,
        commit_count: u64,
        repository_count: u64,
    ) -> Self {
        Self {
            language,
            total_bytes,
            commit_count,
            repository_count,
            months_since_activity: None,
        }
    }

    /// Apply the staleness discount for `months` without activity.
    pub fn with_months_since_activity(mut self, months: f64) -> Self {
        self.months_since_activity = Some(months);
        self
    }
}

/// Turns aggregated language stats into bounded intensity scores.
#[derive(Debug, Clone, Default)]
pub struct IntensityScorer {
    complexity: ComplexityTable,
}

impl IntensityScorer {
    /// Scorer with the built-in complexity table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer with a custom complexity table.
    pub fn with_complexity(complexity: ComplexityTable) -> Self {
        Self { complexity }
    }

    /// Complexity table in use.
    pub fn complexity(&self) -> &ComplexityTable {
        &self.complexity
    }

    /// Score one language. Always in `[0, 100]`, rounded to 2 decimals.
    pub fn score(&self, input: &ScoreInput<'_>) -> f64 {
        if input.total_bytes == 0 || input.commit_count == 0 {
            return 0.0;
        }

        let mut base = VOLUME_WEIGHT * volume_score(line_count(input.total_bytes))
            + COMMIT_WEIGHT * commit_score(input.commit_count)
            + REPOSITORY_WEIGHT * repository_score(input.repository_count);

        if let Some(months) = input.months_since_activity {
            base *= time_weight(months);
        }

        let weighted = base * self.complexity.factor(input.language);
        round2(weighted.min(MAX_INTENSITY))
    }

    /// Rescale so the maximum becomes 100, preserving ratios.
    ///
    /// Empty input gives empty output; all-zero input is returned unchanged.
    pub fn normalize(scores: &[f64]) -> Vec<f64> {
        let max = scores.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return scores.to_vec();
        }
        scores
            .iter()
            .map(|s| round2(s / max * MAX_INTENSITY))
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn volume_score(lines: u64) -> f64 {
    ((lines.max(1) as f64).log10() * 15.0).min(VOLUME_CAP)
}

#[allow(clippy::cast_precision_loss)]
fn commit_score(commits: u64) -> f64 {
    ((commits.max(1) as f64).log10() * 20.0).min(COMMIT_CAP)
}

#[allow(clippy::cast_precision_loss)]
fn repository_score(repos: u64) -> f64 {
    ((repos as f64).sqrt() * 8.0).min(REPOSITORY_CAP)
}

/// Staleness discount in `(0.7, 1.0]`. Negative input is treated as 0.
pub fn time_weight(months_since_activity: f64) -> f64 {
    let months = months_since_activity.max(0.0);
    TIME_WEIGHT_FLOOR + TIME_WEIGHT_SPAN * (-months / TIME_DECAY_MONTHS).exp()
}
