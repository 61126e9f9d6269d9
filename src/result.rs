//! Analysis result types.
//!
//! Both types are produced once at the end of a run and never mutated
//! afterwards. `languages` is always ordered by intensity, highest first,
//! with ties broken by language name ascending.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score and supporting counts for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageIntensity {
    /// Language name as reported by the data source.
    pub language: String,
    /// Bounded score in `[0, 100]`.
    pub intensity: f64,
    /// Commits across every repository containing this language.
    pub commit_count: u64,
    /// Estimated lines (`total_bytes / 50`).
    pub line_count: u64,
    /// Repositories containing this language.
    pub repository_count: u64,
    /// Commits inside the recency window.
    #[serde(default)]
    pub recent_commit_count: u64,
}

impl LanguageIntensity {
    /// Ordering used for result lists: intensity descending, then name ascending.
    pub fn ranking(a: &Self, b: &Self) -> Ordering {
        b.intensity
            .total_cmp(&a.intensity)
            .then_with(|| a.language.cmp(&b.language))
    }
}

/// Result of one completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// User that was analysed.
    pub username: String,
    /// Reference time of the run.
    pub analysis_date: DateTime<Utc>,
    /// Sorted by [`LanguageIntensity::ranking`].
    pub languages: Vec<LanguageIntensity>,
    /// Non-fork repositories, including any that were skipped.
    pub total_repositories: u64,
    /// Commits across successfully processed repositories.
    pub total_commits: u64,
    /// Recency window used for `recent_commit_count`.
    pub analysis_period_months: u32,
    /// Repositories dropped because their data could not be fetched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_repositories: Vec<String>,
}

impl AnalysisResult {
    /// Look up a language entry by name.
    pub fn language(&self, name: &str) -> Option<&LanguageIntensity> {
        self.languages.iter().find(|l| l.language == name)
    }

    /// The highest-scoring language, if any.
    pub fn top_language(&self) -> Option<&LanguageIntensity> {
        self.languages.first()
    }

    /// Number of languages seen.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Check if no language was found.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
