//! Job lifecycle types.
//!
//! The job state machine:
//!
//! ```text
//!   submit() ──→ Pending ──→ Processing ──→ Completed
//!                                 │
//!                                 └──→ Failed(error_message)
//! ```
//!
//! **Invariants:**
//! - `submit_analysis()` MUST return `Pending`.
//! - Transitions are monotonic — a job never moves backward.
//! - Terminal states (`Completed`, `Failed`) are permanent.
//! - `result` is present iff the status is `Completed`; `error_message` is
//!   present iff the status is `Failed`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PilerError, PilerResult};
use crate::result::AnalysisResult;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create a job ID from an existing token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random job ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job is created but the run has not started.
    Pending,
    /// Run is fetching and aggregating.
    Processing,
    /// Run finished and a result is attached.
    Completed,
    /// Run aborted; an error message is attached.
    Failed,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Check if moving from `self` to `next` is allowed.
    ///
    /// A job may fail straight out of `Pending` if its run cannot start.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Processing)
                | (JobStatus::Pending, JobStatus::Failed)
                | (JobStatus::Processing, JobStatus::Completed)
                | (JobStatus::Processing, JobStatus::Failed)
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to analyse one GitHub user.
#[derive(Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// GitHub login to analyse.
    pub username: String,
    /// Token forwarded to the data source. Never serialized.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

impl AnalysisRequest {
    /// Create an anonymous request for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_token: None,
        }
    }

    /// Attach an access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("username", &self.username)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// One analysis job record.
///
/// Fields are read-only from the outside; the orchestrator drives the
/// transitions through the job store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Identifier returned by `submit_analysis`.
    pub id: JobId,
    /// User being analysed.
    pub username: String,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// When the job was submitted.
    pub created_at: DateTime<Utc>,
    /// Set once the job reaches a terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Present only when `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    /// Present only when `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Job {
    /// Create a pending job stamped with the current time.
    pub fn pending(id: JobId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            status: JobStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            result: None,
            error_message: None,
        }
    }

    /// Move to `Processing`.
    pub(crate) fn start(&mut self) -> PilerResult<()> {
        self.transition(JobStatus::Processing)
    }

    /// Move to `Completed`, attaching the result.
    pub(crate) fn complete(&mut self, result: AnalysisResult) -> PilerResult<()> {
        self.transition(JobStatus::Completed)?;
        self.result = Some(result);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Move to `Failed`, recording the message verbatim.
    pub(crate) fn fail(&mut self, message: impl Into<String>) -> PilerResult<()> {
        self.transition(JobStatus::Failed)?;
        self.error_message = Some(message.into());
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> PilerResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(PilerError::Internal(format!(
                "job {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}
