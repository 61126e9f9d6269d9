//! Skill Piler — per-language skill intensity analysis for GitHub users
//!
//! This crate turns a user's public, non-fork repositories into a ranked list
//! of languages, each with a bounded "intensity" score built from code
//! volume, commit activity, repository spread, recency and a per-language
//! complexity factor.
//!
//! # Overview
//!
//! The crate defines:
//! - A [`RepositoryDataSource`] trait that anything talking to GitHub implements
//! - [`AnalysisOrchestrator`] for the asynchronous job lifecycle and per-repository fan-out
//! - [`IntensityScorer`] / [`ComplexityTable`] for scoring
//! - [`JobStore`], [`Job`], [`JobId`], [`JobStatus`] for job tracking
//! - [`AnalysisResult`] / [`LanguageIntensity`] for results
//! - [`AnalysisConfig`] for tunables
//! - [`PilerError`] with categorized error variants
//! - [`MemorySource`], an in-memory data source for tests and demos
//!
//! # Lifecycle
//!
//! ```text
//!   submit_analysis() ──→ get_status() ──→ get_result()
//!      (returns Pending)     (poll)          (Completed only)
//! ```
//!
//! ```ignore
//! use std::sync::Arc;
//! use skill_piler::{AnalysisOrchestrator, AnalysisRequest, JobStore};
//!
//! let orchestrator = AnalysisOrchestrator::new(Arc::new(my_source), Arc::new(JobStore::new()));
//! let job = orchestrator.submit_analysis(AnalysisRequest::new("octocat")).await?;
//! let result = orchestrator.wait(&job.id).await?;
//! for lang in &result.languages {
//!     println!("{}: {}", lang.language, lang.intensity);
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod job;
pub mod memory;
pub mod orchestrator;
pub mod result;
pub mod scorer;
pub mod source;
pub mod store;

pub use aggregate::{Aggregation, LanguageAccumulator, RepositorySample};
pub use config::AnalysisConfig;
pub use error::{PilerError, PilerResult};
pub use job::{AnalysisRequest, Job, JobId, JobStatus};
pub use memory::MemorySource;
pub use orchestrator::AnalysisOrchestrator;
pub use result::{AnalysisResult, LanguageIntensity};
pub use scorer::{ComplexityTable, IntensityScorer, ScoreInput};
pub use source::{CommitInfo, LanguageBytes, RepositoryDataSource, RepositoryInfo};
pub use store::JobStore;
