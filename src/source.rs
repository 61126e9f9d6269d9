//! Repository data source trait and boundary records.
//!
//! The [`RepositoryDataSource`] trait is the seam between the analysis core
//! and whatever talks to GitHub:
//!
//! ```text
//!   list_repositories() ──→ get_languages() ──→ get_commits()
//!       (per user)             (per repo)          (per repo)
//! ```
//!
//! ## Contract
//!
//! - **Async-native**: every method is async.
//! - **Thread-safe**: `Send + Sync`, so one source is shared by all runs.
//! - **Typed**: upstream payloads are converted to [`RepositoryInfo`],
//!   [`LanguageBytes`] and [`CommitInfo`] before they reach the core.
//! - **Bounded history**: `get_commits()` returns one page, most recent first.
//!
//! Failures use [`PilerError::NotFound`](crate::PilerError::NotFound),
//! [`PilerError::RateLimited`](crate::PilerError::RateLimited) or
//! [`PilerError::Upstream`](crate::PilerError::Upstream). The core does not
//! retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PilerResult;

/// Supplies repository, language and commit data for one user.
#[async_trait]
pub trait RepositoryDataSource: Send + Sync {
    /// List the user's repositories, forks included.
    async fn list_repositories(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> PilerResult<Vec<RepositoryInfo>>;

    /// Get the language → byte count map of one repository.
    async fn get_languages(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> PilerResult<LanguageBytes>;

    /// Get the most recent page of commits, newest first.
    ///
    /// MUST return at most `per_page` commits.
    async fn get_commits(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
        per_page: u32,
    ) -> PilerResult<Vec<CommitInfo>>;
}

/// One repository as listed by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Repository name without the owner.
    pub name: String,
    /// Forks are excluded from analysis.
    #[serde(default)]
    pub is_fork: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary language reported by GitHub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    /// Last push or metadata update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryInfo {
    /// Create a non-fork repository entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_fork: false,
            description: None,
            primary_language: None,
            updated_at: None,
        }
    }

    /// Create a fork entry.
    pub fn fork(name: impl Into<String>) -> Self {
        Self {
            is_fork: true,
            ..Self::new(name)
        }
    }
}

/// Language → byte count map for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageBytes {
    bytes: FxHashMap<String, u64>,
}

impl LanguageBytes {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map from (language, bytes) pairs. Duplicate languages are summed.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut bytes = Self::new();
        for (language, count) in iter {
            bytes.insert(language, count);
        }
        bytes
    }

    /// Add bytes for a language.
    pub fn insert(&mut self, language: impl Into<String>, count: u64) {
        *self.bytes.entry(language.into()).or_default() += count;
    }

    /// Bytes for a language, 0 if absent.
    pub fn get(&self, language: &str) -> u64 {
        self.bytes.get(language).copied().unwrap_or(0)
    }

    /// Iterate over (language, bytes) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.bytes.iter()
    }

    /// Total bytes across all languages.
    pub fn total(&self) -> u64 {
        self.bytes.values().sum()
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the repository reported no languages.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl FromIterator<(String, u64)> for LanguageBytes {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// One commit from a repository's most recent page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash.
    pub sha: String,
    /// Author date as sent upstream (RFC 3339). May be missing or malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_date: Option<String>,
    /// Author display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Commit message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommitInfo {
    /// Create a commit with an author date.
    pub fn new(sha: impl Into<String>, author_date: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            author_date: Some(author_date.into()),
            author_name: None,
            message: None,
        }
    }

    /// Create a commit without an author date.
    pub fn undated(sha: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            author_date: None,
            author_name: None,
            message: None,
        }
    }

    /// Parsed author date, `None` if missing or not RFC 3339.
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.author_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}
