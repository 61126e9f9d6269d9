//! Analysis orchestration.
//!
//! ```text
//!   submit_analysis() ──→ Pending ─┐            (returns immediately)
//!                                  │ spawned run
//!                                  ▼
//!       Processing: list repos ──→ drop forks ──→ fan out per repo
//!                                                   │  languages + commits
//!                                                   ▼
//!                     fold into accumulators ──→ score ──→ rank
//!                                  │
//!                                  ▼
//!                        Completed | Failed
//! ```
//!
//! ## Failure boundaries
//!
//! - Listing the user's repositories is fatal: the job fails with the error text.
//! - A per-repository failure or timeout is recovered: that repository is
//!   logged, recorded in `skipped_repositories`, and left out of the totals.
//! - Any other error fails the job, and so does a panic inside the run.
//!
//! Each data source call is bounded by the configured request timeout. There
//! is no timeout on the run as a whole and no cancellation.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::aggregate::{Aggregation, RepositorySample};
use crate::config::AnalysisConfig;
use crate::error::{PilerError, PilerResult};
use crate::job::{AnalysisRequest, Job, JobId, JobStatus};
use crate::result::AnalysisResult;
use crate::scorer::{ComplexityTable, IntensityScorer};
use crate::source::RepositoryDataSource;
use crate::store::JobStore;

/// Poll interval used by [`AnalysisOrchestrator::wait`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Longest [`AnalysisOrchestrator::wait`] will block.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(300);

/// Runs analyses against a data source and tracks them in a [`JobStore`].
pub struct AnalysisOrchestrator<S> {
    source: Arc<S>,
    store: Arc<JobStore>,
    scorer: Arc<IntensityScorer>,
    config: Arc<AnalysisConfig>,
}

impl<S> Clone for AnalysisOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            scorer: Arc::clone(&self.scorer),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AnalysisOrchestrator<S>
where
    S: RepositoryDataSource + 'static,
{
    /// Orchestrator with the default configuration.
    pub fn new(source: Arc<S>, store: Arc<JobStore>) -> Self {
        Self {
            source,
            store,
            scorer: Arc::new(IntensityScorer::new()),
            config: Arc::new(AnalysisConfig::default()),
        }
    }

    /// Orchestrator with a validated custom configuration.
    pub fn with_config(
        source: Arc<S>,
        store: Arc<JobStore>,
        config: AnalysisConfig,
    ) -> PilerResult<Self> {
        config.validate()?;
        let complexity = ComplexityTable::standard().with_overrides(&config.complexity_overrides);
        Ok(Self {
            source,
            store,
            scorer: Arc::new(IntensityScorer::with_complexity(complexity)),
            config: Arc::new(config),
        })
    }

    /// Job store shared with every run.
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// Configuration in effect.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Create a pending job and start its run in the background.
    ///
    /// Returns without waiting for the run. MUST be called inside a Tokio runtime.
    pub async fn submit_analysis(&self, mut request: AnalysisRequest) -> PilerResult<Job> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(PilerError::Validation("username must not be empty".into()));
        }
        request.username = username.to_string();

        let job = self.store.create(&request).await;
        info!(job_id = %job.id, username = %request.username, "analysis submitted");

        let span = info_span!("analysis", job_id = %job.id, username = %request.username);
        tokio::spawn(self.clone().run(job.id.clone(), request).instrument(span));

        Ok(job)
    }

    /// Current snapshot of a job.
    pub async fn get_status(&self, job_id: &JobId) -> PilerResult<Job> {
        self.store.get(job_id).await
    }

    /// Result of a completed job.
    pub async fn get_result(&self, job_id: &JobId) -> PilerResult<AnalysisResult> {
        let job = self.store.get(job_id).await?;
        if job.status != JobStatus::Completed {
            return Err(PilerError::NotReady {
                job_id: job_id.0.clone(),
                status: job.status.to_string(),
            });
        }
        job.result.ok_or_else(|| {
            PilerError::Internal(format!("job {job_id} is completed but has no result"))
        })
    }

    /// Wait for a job to finish and return its result.
    ///
    /// Polls every 500ms for up to 5 minutes.
    pub async fn wait(&self, job_id: &JobId) -> PilerResult<AnalysisResult> {
        self.wait_with(job_id, DEFAULT_POLL_INTERVAL, DEFAULT_MAX_WAIT)
            .await
    }

    /// Wait for a job with an explicit poll interval and limit.
    ///
    /// Failed jobs yield [`PilerError::JobFailed`]; exceeding `max_wait`
    /// yields [`PilerError::Timeout`]. The run itself keeps going.
    pub async fn wait_with(
        &self,
        job_id: &JobId,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> PilerResult<AnalysisResult> {
        let deadline = tokio::time::Instant::now() + max_wait;
        loop {
            let job = self.store.get(job_id).await?;
            match job.status {
                JobStatus::Completed => return self.get_result(job_id).await,
                JobStatus::Failed => {
                    return Err(PilerError::JobFailed(job.error_message.unwrap_or_default()));
                }
                JobStatus::Pending | JobStatus::Processing => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(PilerError::Timeout(job_id.0.clone()));
                    }
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }

    async fn run(self, job_id: JobId, request: AnalysisRequest) {
        if let Err(e) = self.store.update(&job_id, Job::start).await {
            error!(error = %e, "could not start analysis");
            return;
        }

        let outcome = AssertUnwindSafe(self.analyse(&request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(PilerError::Internal(format!(
                    "analysis panicked: {}",
                    panic_message(&*payload)
                )))
            });

        let update = match outcome {
            Ok(result) => {
                info!(
                    languages = result.languages.len(),
                    repositories = result.total_repositories,
                    skipped = result.skipped_repositories.len(),
                    "analysis completed"
                );
                self.store.update(&job_id, |job| job.complete(result)).await
            }
            Err(e) => {
                error!(error = %e, "analysis failed");
                let message = e.to_string();
                self.store.update(&job_id, |job| job.fail(message)).await
            }
        };

        if let Err(e) = update {
            error!(error = %e, "could not finalize job");
        }
    }

    async fn analyse(&self, request: &AnalysisRequest) -> PilerResult<AnalysisResult> {
        let owner = request.username.as_str();
        let token = request.access_token.as_deref();

        let repositories = self
            .call(
                "list repositories",
                self.source.list_repositories(owner, token),
            )
            .await?;

        let names: Vec<String> = repositories
            .into_iter()
            .filter(|r| !r.is_fork)
            .map(|r| r.name)
            .collect();
        let total_repositories = names.len() as u64;
        info!(repositories = total_repositories, "found non-fork repositories");

        let now = Utc::now();
        let mut aggregation = Aggregation::new(now, self.config.recency_months);
        let mut skipped = Vec::new();

        let mut fetches = pin!(
            stream::iter(names)
                .map(move |name| async move {
                    let outcome = self.fetch_repository(owner, &name, token).await;
                    (name, outcome)
                })
                .buffer_unordered(self.config.max_concurrent_fetches)
        );

        while let Some((name, outcome)) = fetches.next().await {
            match outcome {
                Ok(sample) => {
                    debug!(
                        repo = %name,
                        languages = sample.languages.len(),
                        commits = sample.commits.len(),
                        "processed repository"
                    );
                    aggregation.merge(&sample);
                }
                Err(e) => {
                    warn!(repo = %name, error = %e, "skipping repository");
                    skipped.push(name);
                }
            }
        }
        skipped.sort();

        let total_commits = aggregation.total_commits();
        let languages = aggregation.finish(&self.scorer);

        Ok(AnalysisResult {
            username: request.username.clone(),
            analysis_date: now,
            languages,
            total_repositories,
            total_commits,
            analysis_period_months: self.config.recency_months,
            skipped_repositories: skipped,
        })
    }

    async fn fetch_repository(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> PilerResult<RepositorySample> {
        let (languages, commits) = futures::try_join!(
            self.call("get languages", self.source.get_languages(owner, repo, token)),
            self.call(
                "get commits",
                self.source
                    .get_commits(owner, repo, token, self.config.commit_page_size),
            ),
        )?;
        Ok(RepositorySample {
            name: repo.to_string(),
            languages,
            commits,
        })
    }

    /// Bound one data source call by the request timeout.
    async fn call<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = PilerResult<T>>,
    ) -> PilerResult<T> {
        let limit = self.config.request_timeout();
        tokio::time::timeout(limit, fut).await.map_err(|_| {
            PilerError::Upstream(format!("{operation} timed out after {}s", limit.as_secs()))
        })?
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::memory::MemorySource;
    use crate::source::{CommitInfo, LanguageBytes, RepositoryInfo};

    /// Lists one repository, then panics while fetching its languages.
    struct PanickingSource;

    #[async_trait]
    impl RepositoryDataSource for PanickingSource {
        async fn list_repositories(
            &self,
            _username: &str,
            _token: Option<&str>,
        ) -> PilerResult<Vec<RepositoryInfo>> {
            Ok(vec![RepositoryInfo::new("cursed")])
        }

        async fn get_languages(
            &self,
            _owner: &str,
            repo: &str,
            _token: Option<&str>,
        ) -> PilerResult<LanguageBytes> {
            panic!("language table for {repo} is corrupt");
        }

        async fn get_commits(
            &self,
            _owner: &str,
            _repo: &str,
            _token: Option<&str>,
            _per_page: u32,
        ) -> PilerResult<Vec<CommitInfo>> {
            Ok(vec![])
        }
    }

    fn recent_commits(n: usize) -> Vec<CommitInfo> {
        (0..n)
            .map(|i| {
                let date = Utc::now() - chrono::Duration::days(i as i64);
                CommitInfo::new(format!("sha{i}"), date.to_rfc3339())
            })
            .collect()
    }

    fn orchestrator(source: MemorySource) -> AnalysisOrchestrator<MemorySource> {
        AnalysisOrchestrator::new(Arc::new(source), Arc::new(JobStore::new()))
    }

    fn single_python_repo() -> MemorySource {
        MemorySource::new("testuser").with_repository(
            RepositoryInfo::new("test-repo"),
            LanguageBytes::from_pairs([("Python", 10_000)]),
            recent_commits(50),
        )
    }

    #[tokio::test]
    async fn test_submit_returns_pending_job() {
        let orch = orchestrator(single_python_repo());
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.username, "testuser");
        assert!(job.completed_at.is_none());

        let fetched = orch.get_status(&job.id).await.unwrap();
        assert_eq!(fetched.id, job.id);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_username() {
        let orch = orchestrator(single_python_repo());
        for username in ["", "   "] {
            let err = orch
                .submit_analysis(AnalysisRequest::new(username))
                .await
                .unwrap_err();
            assert!(matches!(err, PilerError::Validation(_)));
        }
        assert!(orch.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let orch = orchestrator(single_python_repo());
        let id = JobId::from("nonexistent-job-id");
        assert!(matches!(
            orch.get_status(&id).await,
            Err(PilerError::JobNotFound(_))
        ));
        assert!(matches!(
            orch.get_result(&id).await,
            Err(PilerError::JobNotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_not_ready_while_running() {
        let source = single_python_repo().with_delay("test-repo", Duration::from_secs(10));
        let orch = orchestrator(source);
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        let err = orch.get_result(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::NotReady { ref status, .. } if status == "pending"));
    }

    #[tokio::test]
    async fn test_result_not_ready_while_processing_or_failed() {
        let orch = orchestrator(single_python_repo());
        let store = orch.store();
        let job = store.create(&AnalysisRequest::new("testuser")).await;

        store.update(&job.id, Job::start).await.unwrap();
        let err = orch.get_result(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::NotReady { ref status, .. } if status == "processing"));

        store
            .update(&job.id, |j| j.fail("Upstream error: API Error"))
            .await
            .unwrap();
        let err = orch.get_result(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::NotReady { ref status, .. } if status == "failed"));
    }

    #[tokio::test]
    async fn test_completed_without_result_is_internal() {
        let orch = orchestrator(single_python_repo());
        let store = orch.store();
        let job = store.create(&AnalysisRequest::new("testuser")).await;
        store
            .update(&job.id, |j| {
                j.status = JobStatus::Completed;
                Ok(())
            })
            .await
            .unwrap();

        let err = orch.get_result(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::Internal(_)));
    }

    #[tokio::test]
    async fn test_single_language_end_to_end() {
        let orch = orchestrator(single_python_repo());
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser").with_access_token("mock_token"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.username, "testuser");
        assert_eq!(result.languages.len(), 1);
        let python = &result.languages[0];
        assert_eq!(python.language, "Python");
        assert_eq!(python.line_count, 200);
        assert_eq!(python.repository_count, 1);
        assert_eq!(python.commit_count, 50);
        assert_eq!(python.recent_commit_count, 50);
        assert!(python.intensity > 0.0 && python.intensity <= 100.0);

        assert_eq!(result.total_repositories, 1);
        assert_eq!(result.total_commits, 50);
        assert_eq!(result.analysis_period_months, 12);
        assert!(result.skipped_repositories.is_empty());

        let done = orch.get_status(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        assert!(done.completed_at.is_some());
        assert!(done.error_message.is_none());
    }

    #[tokio::test]
    async fn test_forks_are_excluded() {
        let source = single_python_repo().with_repository(
            RepositoryInfo::fork("linux"),
            LanguageBytes::from_pairs([("C", 5_000_000), ("Python", 1_000)]),
            recent_commits(100),
        );
        let orch = orchestrator(source);
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.total_repositories, 1);
        assert_eq!(result.total_commits, 50);
        assert!(result.language("C").is_none());
        let python = result.language("Python").unwrap();
        assert_eq!(python.line_count, 200);
        assert_eq!(python.repository_count, 1);
    }

    #[tokio::test]
    async fn test_failed_repository_is_skipped() {
        let source = MemorySource::new("testuser")
            .with_repository(
                RepositoryInfo::new("a"),
                LanguageBytes::from_pairs([("Java", 40_000)]),
                recent_commits(10),
            )
            .with_repository(
                RepositoryInfo::new("b"),
                LanguageBytes::from_pairs([("Go", 20_000)]),
                recent_commits(5),
            )
            .with_failing_repository("a");
        let orch = orchestrator(source);
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.languages.len(), 1);
        assert_eq!(result.languages[0].language, "Go");
        assert_eq!(result.total_commits, 5);
        assert_eq!(result.total_repositories, 2);
        assert_eq!(result.skipped_repositories, vec!["a".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_repository_times_out_and_is_skipped() {
        let source = single_python_repo()
            .with_repository(
                RepositoryInfo::new("slow"),
                LanguageBytes::from_pairs([("Haskell", 9_000)]),
                recent_commits(3),
            )
            .with_delay("slow", Duration::from_secs(60));
        let config = AnalysisConfig::default().with_request_timeout_secs(30);
        let orch =
            AnalysisOrchestrator::with_config(Arc::new(source), Arc::new(JobStore::new()), config)
                .unwrap();

        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert!(result.language("Haskell").is_none());
        assert_eq!(result.skipped_repositories, vec!["slow".to_string()]);
        assert_eq!(result.language("Python").unwrap().commit_count, 50);
    }

    #[tokio::test]
    async fn test_listing_failure_fails_job() {
        let orch = orchestrator(single_python_repo().with_listing_error("API Error"));
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        let err = orch.wait(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::JobFailed(ref msg) if msg.contains("API Error")));

        let failed = orch.get_status(&job.id).await.unwrap();
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("Upstream error: API Error"));
        assert!(failed.completed_at.is_some());
        assert!(failed.result.is_none());
    }

    #[tokio::test]
    async fn test_panicking_source_fails_job() {
        let orch = AnalysisOrchestrator::new(Arc::new(PanickingSource), Arc::new(JobStore::new()));
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        let err = orch.wait(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::JobFailed(ref msg) if msg.contains("corrupt")));

        let failed = orch.get_status(&job.id).await.unwrap();
        assert_eq!(failed.status, JobStatus::Failed);
        let message = failed.error_message.unwrap();
        assert!(message.starts_with("Internal error: analysis panicked"));
        assert!(failed.completed_at.is_some());
        assert!(failed.result.is_none());
    }

    #[tokio::test]
    async fn test_oversized_recency_window_completes() {
        let orch = AnalysisOrchestrator {
            config: Arc::new(AnalysisConfig::default().with_recency_months(u32::MAX)),
            ..orchestrator(single_python_repo())
        };
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        let result = orch.wait(&job.id).await.unwrap();
        assert_eq!(result.languages[0].recent_commit_count, 50);
        assert_eq!(result.analysis_period_months, u32::MAX);
    }

    #[test]
    fn test_panic_message_payloads() {
        let borrowed: Box<dyn Any + Send> = Box::new("static text");
        let owned: Box<dyn Any + Send> = Box::new(String::from("formatted text"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*borrowed), "static text");
        assert_eq!(panic_message(&*owned), "formatted text");
        assert_eq!(panic_message(&*other), "unknown panic");
    }

    #[tokio::test]
    async fn test_unknown_user_fails_job() {
        let orch = orchestrator(single_python_repo());
        let job = orch
            .submit_analysis(AnalysisRequest::new("ghost"))
            .await
            .unwrap();

        let err = orch.wait(&job.id).await.unwrap_err();
        assert!(matches!(err, PilerError::JobFailed(ref msg) if msg.contains("ghost")));
    }

    #[tokio::test]
    async fn test_commits_credited_to_every_language() {
        let source = MemorySource::new("testuser").with_repository(
            RepositoryInfo::new("web"),
            LanguageBytes::from_pairs([("TypeScript", 30_000), ("CSS", 3_000)]),
            recent_commits(7),
        );
        let orch = orchestrator(source);
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.language("TypeScript").unwrap().commit_count, 7);
        assert_eq!(result.language("CSS").unwrap().commit_count, 7);
        assert_eq!(result.total_commits, 7);
        assert_eq!(result.top_language().unwrap().language, "TypeScript");
    }

    #[tokio::test]
    async fn test_results_ranked_descending() {
        let source = MemorySource::new("testuser")
            .with_repository(
                RepositoryInfo::new("engine"),
                LanguageBytes::from_pairs([("C++", 500_000)]),
                recent_commits(80),
            )
            .with_repository(
                RepositoryInfo::new("docs"),
                LanguageBytes::from_pairs([("Markdown", 2_000), ("JSON", 1_000)]),
                recent_commits(3),
            );
        let orch = orchestrator(source);
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.languages.len(), 3);
        assert_eq!(result.languages[0].language, "C++");
        for pair in result.languages.windows(2) {
            assert!(pair[0].intensity >= pair[1].intensity);
        }
    }

    #[tokio::test]
    async fn test_jobs_are_independent() {
        let orch = orchestrator(single_python_repo());
        let a = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let b = orch
            .submit_analysis(AnalysisRequest::new("ghost"))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);

        assert!(orch.wait(&a.id).await.is_ok());
        assert!(orch.wait(&b.id).await.is_err());
        assert_eq!(orch.store().len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let source = single_python_repo().with_delay("test-repo", Duration::from_secs(600));
        let config = AnalysisConfig::default().with_request_timeout_secs(3_600);
        let orch =
            AnalysisOrchestrator::with_config(Arc::new(source), Arc::new(JobStore::new()), config)
                .unwrap();
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();

        let err = orch
            .wait_with(&job.id, Duration::from_millis(100), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PilerError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_with_config_rejects_invalid() {
        let config = AnalysisConfig::default().with_max_concurrent_fetches(0);
        let result = AnalysisOrchestrator::with_config(
            Arc::new(single_python_repo()),
            Arc::new(JobStore::new()),
            config,
        );
        assert!(matches!(result, Err(PilerError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_complexity_override_applies() {
        let source = MemorySource::new("testuser").with_repository(
            RepositoryInfo::new("zig-app"),
            LanguageBytes::from_pairs([("Zig", 10_000), ("Python", 10_000)]),
            recent_commits(50),
        );
        let config = AnalysisConfig::default().with_complexity("Zig", 1.5);
        let orch =
            AnalysisOrchestrator::with_config(Arc::new(source), Arc::new(JobStore::new()), config)
                .unwrap();
        let job = orch
            .submit_analysis(AnalysisRequest::new("testuser"))
            .await
            .unwrap();
        let result = orch.wait(&job.id).await.unwrap();

        assert_eq!(result.top_language().unwrap().language, "Zig");
        assert!(result.languages[0].intensity > result.languages[1].intensity);
    }
}
