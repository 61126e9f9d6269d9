//! In-memory repository data source.
//!
//! Serves fixed repositories, languages and commits without any network
//! access. Listing failures, per-repository failures and artificial delays
//! can be injected to exercise the orchestrator's failure handling.

use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{PilerError, PilerResult};
use crate::source::{CommitInfo, LanguageBytes, RepositoryDataSource, RepositoryInfo};

#[derive(Debug, Clone)]
struct StoredRepository {
    info: RepositoryInfo,
    languages: LanguageBytes,
    commits: Vec<CommitInfo>,
}

/// Canned data for a single user.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    username: String,
    repositories: Vec<StoredRepository>,
    listing_error: Option<String>,
    failing: FxHashSet<String>,
    delays: FxHashMap<String, Duration>,
}

impl MemorySource {
    /// Source serving `username` with no repositories.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Add a repository with its languages and commits (newest first).
    pub fn with_repository(
        mut self,
        info: RepositoryInfo,
        languages: LanguageBytes,
        commits: Vec<CommitInfo>,
    ) -> Self {
        self.repositories.push(StoredRepository {
            info,
            languages,
            commits,
        });
        self
    }

    /// Make `list_repositories` fail with an upstream error.
    pub fn with_listing_error(mut self, message: impl Into<String>) -> Self {
        self.listing_error = Some(message.into());
        self
    }

    /// Make language and commit lookups for `repo` fail.
    pub fn with_failing_repository(mut self, repo: impl Into<String>) -> Self {
        self.failing.insert(repo.into());
        self
    }

    /// Delay every per-repository call for `repo`.
    pub fn with_delay(mut self, repo: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(repo.into(), delay);
        self
    }

    async fn repository(&self, owner: &str, repo: &str) -> PilerResult<&StoredRepository> {
        if let Some(delay) = self.delays.get(repo) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(repo) {
            return Err(PilerError::Upstream(format!(
                "injected failure for {owner}/{repo}"
            )));
        }
        if owner != self.username {
            return Err(PilerError::NotFound(format!("Repository {owner}/{repo} not found")));
        }
        self.repositories
            .iter()
            .find(|r| r.info.name == repo)
            .ok_or_else(|| PilerError::NotFound(format!("Repository {owner}/{repo} not found")))
    }
}

#[async_trait]
impl RepositoryDataSource for MemorySource {
    async fn list_repositories(
        &self,
        username: &str,
        _token: Option<&str>,
    ) -> PilerResult<Vec<RepositoryInfo>> {
        if let Some(message) = &self.listing_error {
            return Err(PilerError::Upstream(message.clone()));
        }
        if username != self.username {
            return Err(PilerError::NotFound(format!("User {username} not found")));
        }
        Ok(self.repositories.iter().map(|r| r.info.clone()).collect())
    }

    async fn get_languages(
        &self,
        owner: &str,
        repo: &str,
        _token: Option<&str>,
    ) -> PilerResult<LanguageBytes> {
        Ok(self.repository(owner, repo).await?.languages.clone())
    }

    async fn get_commits(
        &self,
        owner: &str,
        repo: &str,
        _token: Option<&str>,
        per_page: u32,
    ) -> PilerResult<Vec<CommitInfo>> {
        let stored = self.repository(owner, repo).await?;
        Ok(stored
            .commits
            .iter()
            .take(per_page as usize)
            .cloned()
            .collect())
    }
}
