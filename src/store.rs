//! In-memory job registry.
//!
//! Each record sits behind its own lock, so a status query never observes a
//! half-applied transition while a run is writing. The store never evicts;
//! retention is left to whoever owns the process.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::error::{PilerError, PilerResult};
use crate::job::{AnalysisRequest, Job, JobId};

/// Registry of analysis jobs, addressable by id.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<FxHashMap<JobId, Arc<RwLock<Job>>>>,
}

impl JobStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending job with a fresh id.
    pub async fn create(&self, request: &AnalysisRequest) -> Job {
        let job = Job::pending(JobId::generate(), request.username.clone());
        self.jobs
            .write()
            .await
            .insert(job.id.clone(), Arc::new(RwLock::new(job.clone())));
        job
    }

    /// Snapshot of a job.
    pub async fn get(&self, id: &JobId) -> PilerResult<Job> {
        let record = self.record(id).await?;
        let job = record.read().await.clone();
        Ok(job)
    }

    /// Apply `f` to a job under its write lock.
    ///
    /// `f` sees the record exclusively; if it fails the record keeps
    /// whatever state `f` left it in, so transitions must validate before
    /// mutating.
    pub(crate) async fn update<F>(&self, id: &JobId, f: F) -> PilerResult<Job>
    where
        F: FnOnce(&mut Job) -> PilerResult<()>,
    {
        let record = self.record(id).await?;
        let mut job = record.write().await;
        f(&mut job)?;
        Ok(job.clone())
    }

    /// Number of jobs ever created.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// True if no job has been created.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    async fn record(&self, id: &JobId) -> PilerResult<Arc<RwLock<Job>>> {
        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| PilerError::JobNotFound(id.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = JobStore::new();
        assert!(store.is_empty().await);

        let job = store.create(&AnalysisRequest::new("octocat")).await;
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(store.len().await, 1);

        let fetched = store.get(&job.id).await.unwrap();
        assert_eq!(fetched.id, job.id);
        assert_eq!(fetched.status, JobStatus::Pending);
        assert_eq!(fetched.created_at, job.created_at);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = JobStore::new();
        let a = store.create(&AnalysisRequest::new("octocat")).await;
        let b = store.create(&AnalysisRequest::new("octocat")).await;
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_unknown_job() {
        let store = JobStore::new();
        let err = store.get(&JobId::from("nonexistent-job-id")).await.unwrap_err();
        assert!(matches!(err, PilerError::JobNotFound(id) if id == "nonexistent-job-id"));
    }

    #[tokio::test]
    async fn test_update_applies_transition() {
        let store = JobStore::new();
        let job = store.create(&AnalysisRequest::new("octocat")).await;

        let updated = store.update(&job.id, |j| j.start()).await.unwrap();
        assert_eq!(updated.status, JobStatus::Processing);
        assert_eq!(store.get(&job.id).await.unwrap().status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn test_update_rejects_illegal_transition() {
        let store = JobStore::new();
        let job = store.create(&AnalysisRequest::new("octocat")).await;
        store.update(&job.id, |j| j.start()).await.unwrap();
        store.update(&job.id, |j| j.fail("boom")).await.unwrap();

        let err = store.update(&job.id, |j| j.start()).await.unwrap_err();
        assert!(matches!(err, PilerError::Internal(_)));
        assert_eq!(store.get(&job.id).await.unwrap().status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_update_unknown_job() {
        let store = JobStore::new();
        let err = store
            .update(&JobId::from("missing"), |j| j.start())
            .await
            .unwrap_err();
        assert!(matches!(err, PilerError::JobNotFound(_)));
    }
}
