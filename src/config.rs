//! Analysis configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "recency_months": 12,
//!   "commit_page_size": 100,
//!   "max_concurrent_fetches": 8,
//!   "request_timeout_secs": 30,
//!   "complexity_overrides": { "Zig": 1.3 }
//! }
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PilerError, PilerResult};

/// Widest accepted recency window, one hundred years.
pub const MAX_RECENCY_MONTHS: u32 = 1_200;

/// Tunables for one orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Recency window in months (30-day months). 0 counts every commit as recent.
    pub recency_months: u32,
    /// Commits requested per repository.
    pub commit_page_size: u32,
    /// Repositories fetched concurrently within one run.
    pub max_concurrent_fetches: usize,
    /// Limit for each individual data source call.
    pub request_timeout_secs: u64,
    /// Extra or replacement entries for the complexity table.
    #[serde(skip_serializing_if = "FxHashMap::is_empty")]
    pub complexity_overrides: FxHashMap<String, f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recency_months: 12,
            commit_page_size: 100,
            max_concurrent_fetches: 8,
            request_timeout_secs: 30,
            complexity_overrides: FxHashMap::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> PilerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PilerError::Configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or break a run.
    pub fn validate(&self) -> PilerResult<()> {
        if self.recency_months > MAX_RECENCY_MONTHS {
            return Err(PilerError::Configuration(format!(
                "recency_months must be at most {MAX_RECENCY_MONTHS}, got {}",
                self.recency_months
            )));
        }
        if self.commit_page_size == 0 {
            return Err(PilerError::Configuration(
                "commit_page_size must be at least 1".into(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(PilerError::Configuration(
                "max_concurrent_fetches must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(PilerError::Configuration(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if let Some((language, factor)) = self
            .complexity_overrides
            .iter()
            .find(|(_, f)| !f.is_finite() || **f < 0.0)
        {
            return Err(PilerError::Configuration(format!(
                "complexity for {language} must be a non-negative number, got {factor}"
            )));
        }
        Ok(())
    }

    /// Per-call timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Set the recency window.
    pub fn with_recency_months(mut self, months: u32) -> Self {
        self.recency_months = months;
        self
    }

    /// Set the commits requested per repository.
    pub fn with_commit_page_size(mut self, size: u32) -> Self {
        self.commit_page_size = size;
        self
    }

    /// Set how many repositories are fetched at once.
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n;
        self
    }

    /// Set the per-call timeout in seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Override the complexity factor for one language.
    pub fn with_complexity(mut self, language: impl Into<String>, factor: f64) -> Self {
        self.complexity_overrides.insert(language.into(), factor);
        self
    }
}
