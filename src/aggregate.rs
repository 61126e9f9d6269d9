//! Per-language accumulation for one analysis run.
//!
//! Every successfully fetched repository is folded into the accumulators by a
//! single writer. A repository's whole commit page is credited to every
//! language it contains, so a multi-language repository counts its commits
//! once per language. That skew is intentional and kept as-is.

use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;

use crate::result::LanguageIntensity;
use crate::scorer::{IntensityScorer, ScoreInput, line_count};
use crate::source::{CommitInfo, LanguageBytes};

const DAYS_PER_MONTH: i64 = 30;

/// Data fetched for one repository.
#[derive(Debug, Clone)]
pub struct RepositorySample {
    /// Repository name.
    pub name: String,
    /// Language byte counts.
    pub languages: LanguageBytes,
    /// First page of commits.
    pub commits: Vec<CommitInfo>,
}

/// Running totals for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageAccumulator {
    /// Language name as reported by the data source.
    pub language: String,
    /// Bytes summed over contributing repositories.
    pub total_bytes: u64,
    /// Repositories containing the language.
    pub repository_count: u64,
    /// Commits of every contributing repository.
    pub commit_count: u64,
    /// Commits inside the recency window.
    pub recent_activity_count: u64,
    /// Newest parseable commit date across contributing repositories.
    pub last_activity: Option<DateTime<Utc>>,
}

impl LanguageAccumulator {
    fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            total_bytes: 0,
            repository_count: 0,
            commit_count: 0,
            recent_activity_count: 0,
            last_activity: None,
        }
    }
}

/// Accumulators plus run-wide totals.
#[derive(Debug, Clone)]
pub struct Aggregation {
    now: DateTime<Utc>,
    recency_months: u32,
    languages: FxHashMap<String, LanguageAccumulator>,
    total_commits: u64,
    repositories: u64,
}

impl Aggregation {
    /// Empty aggregation anchored at `now`.
    pub fn new(now: DateTime<Utc>, recency_months: u32) -> Self {
        Self {
            now,
            recency_months,
            languages: FxHashMap::default(),
            total_commits: 0,
            repositories: 0,
        }
    }

    /// Fold one repository into the totals.
    pub fn merge(&mut self, sample: &RepositorySample) {
        let commits = sample.commits.len() as u64;
        let recent = recent_commit_count(&sample.commits, self.now, self.recency_months);
        let newest = newest_commit(&sample.commits);

        for (language, bytes) in sample.languages.iter() {
            let acc = self
                .languages
                .entry(language.clone())
                .or_insert_with(|| LanguageAccumulator::new(language));
            acc.total_bytes += bytes;
            acc.repository_count += 1;
            acc.commit_count += commits;
            acc.recent_activity_count += recent;
            acc.last_activity = acc.last_activity.max(newest);
        }

        self.total_commits += commits;
        self.repositories += 1;
    }

    /// Commits across merged repositories, each counted once.
    pub fn total_commits(&self) -> u64 {
        self.total_commits
    }

    /// Number of merged repositories.
    pub fn repositories(&self) -> u64 {
        self.repositories
    }

    /// Accumulator for one language, if any repository contained it.
    pub fn get(&self, language: &str) -> Option<&LanguageAccumulator> {
        self.languages.get(language)
    }

    /// Score every language and return them ranked.
    pub fn finish(self, scorer: &IntensityScorer) -> Vec<LanguageIntensity> {
        let now = self.now;
        let mut ranked: Vec<LanguageIntensity> = self
            .languages
            .into_values()
            .map(|acc| {
                let mut input = ScoreInput::new(
                    &acc.language,
                    acc.total_bytes,
                    acc.commit_count,
                    acc.repository_count,
                );
                if let Some(last) = acc.last_activity {
                    input = input.with_months_since_activity(months_between(last, now));
                }
                let intensity = scorer.score(&input);
                LanguageIntensity {
                    intensity,
                    commit_count: acc.commit_count,
                    line_count: line_count(acc.total_bytes),
                    repository_count: acc.repository_count,
                    recent_commit_count: acc.recent_activity_count,
                    language: acc.language,
                }
            })
            .collect();
        ranked.sort_by(LanguageIntensity::ranking);
        ranked
    }
}

/// Commits authored within `months` (30-day months) of `now`.
///
/// A window of 0 counts every commit. Commits with a missing or
/// unparseable date are skipped. A window reaching past the earliest
/// representable date counts every dated commit.
pub fn recent_commit_count(commits: &[CommitInfo], now: DateTime<Utc>, months: u32) -> u64 {
    if months == 0 {
        return commits.len() as u64;
    }
    let cutoff = TimeDelta::try_days(i64::from(months) * DAYS_PER_MONTH)
        .and_then(|window| now.checked_sub_signed(window));
    commits
        .iter()
        .filter_map(CommitInfo::authored_at)
        .filter(|date| cutoff.is_none_or(|cutoff| *date >= cutoff))
        .count() as u64
}

/// Newest parseable author date on a page.
pub fn newest_commit(commits: &[CommitInfo]) -> Option<DateTime<Utc>> {
    commits.iter().filter_map(CommitInfo::authored_at).max()
}

/// Elapsed 30-day months from `from` to `to`, never negative.
#[allow(clippy::cast_precision_loss)]
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let seconds = (to - from).num_seconds().max(0) as f64;
    seconds / (DAYS_PER_MONTH * 86_400) as f64
}
