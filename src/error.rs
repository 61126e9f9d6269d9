//! Skill Piler error types.
//!
//! Errors are categorized by where they originate and whether a caller can
//! do anything about them:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Request** | `Validation` | Fix input |
//! | **Upstream** | `NotFound`, `RateLimited`, `Upstream` | Fatal during listing, skipped per repository |
//! | **Job-level** | `JobNotFound`, `NotReady`, `JobFailed`, `Timeout` | Poll again or resubmit |
//! | **Config** | `Configuration` | Fix configuration |
//! | **Internal** | `Internal` | None (invariant violation) |

use thiserror::Error;

/// Errors that can occur while analysing a user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PilerError {
    // ── Request errors (rejected before a job exists) ───────────────
    /// Malformed analysis request.
    #[error("Invalid request: {0}")]
    Validation(String),

    // ── Upstream errors (raised by the data source) ──────────────────
    /// Unknown upstream user or repository.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream throttled the request.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other collaborator failure, including per-call timeouts.
    #[error("Upstream error: {0}")]
    Upstream(String),

    // ── Job-level errors ─────────────────────────────────────────────
    /// No job with this id.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Result requested before the job completed.
    #[error("Job {job_id} is not completed (status: {status})")]
    NotReady {
        /// Job that was queried.
        job_id: String,
        /// Status at the time of the query.
        status: String,
    },

    /// Job ended in the failed state.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Waiting for a job exceeded the caller's limit.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    // ── Config errors ────────────────────────────────────────────────
    /// Invalid analysis configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Internal errors ──────────────────────────────────────────────
    /// Invariant violation. Should be unreachable.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PilerError {
    /// Returns `true` if this error is transient and the operation may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Timeout(_))
    }

    /// Returns `true` if this error was raised by the repository data source.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::RateLimited(_) | Self::Upstream(_)
        )
    }
}

/// Result type for Skill Piler operations.
pub type PilerResult<T> = Result<T, PilerError>;
