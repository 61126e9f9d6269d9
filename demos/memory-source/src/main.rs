//! Analyse a fabricated GitHub user end to end.
//!
//! Uses the crate's in-memory data source, so nothing leaves the machine.
//! One repository is a fork and one fails to load; both are left out of the
//! scores. Set `RUST_LOG=skill_piler=debug` to watch the fan-out.

use std::sync::Arc;

use chrono::{Duration, Utc};
use skill_piler::{
    AnalysisConfig, AnalysisOrchestrator, AnalysisRequest, CommitInfo, JobStore, LanguageBytes,
    MemorySource, RepositoryInfo,
};
use tracing_subscriber::EnvFilter;

/// `n` commits, one every `spacing_days`, newest first, ending `age_days` ago.
fn commits(n: usize, age_days: i64, spacing_days: i64) -> Vec<CommitInfo> {
    (0..n)
        .map(|i| {
            let date = Utc::now() - Duration::days(age_days + spacing_days * i as i64);
            CommitInfo::new(format!("{:040x}", i + 1), date.to_rfc3339())
        })
        .collect()
}

fn demo_source() -> MemorySource {
    MemorySource::new("octocat")
        .with_repository(
            RepositoryInfo::new("tokio-chat"),
            LanguageBytes::from_pairs([("Rust", 180_000), ("Shell", 2_400)]),
            commits(100, 2, 3),
        )
        .with_repository(
            RepositoryInfo::new("dashboard"),
            LanguageBytes::from_pairs([("TypeScript", 95_000), ("CSS", 12_000), ("HTML", 4_000)]),
            commits(64, 20, 5),
        )
        .with_repository(
            RepositoryInfo::new("thesis-scripts"),
            LanguageBytes::from_pairs([("Python", 40_000), ("Jupyter Notebook", 250_000)]),
            commits(23, 900, 10),
        )
        .with_repository(
            RepositoryInfo::fork("linux"),
            LanguageBytes::from_pairs([("C", 900_000_000)]),
            commits(100, 1, 1),
        )
        .with_repository(
            RepositoryInfo::new("archived-site"),
            LanguageBytes::from_pairs([("PHP", 30_000)]),
            commits(12, 2_000, 30),
        )
        .with_failing_repository("archived-site")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skill_piler=info")),
        )
        .init();

    let config =
        AnalysisConfig::from_json(r#"{"recency_months": 12, "max_concurrent_fetches": 4}"#)?;
    let orchestrator = AnalysisOrchestrator::with_config(
        Arc::new(demo_source()),
        Arc::new(JobStore::new()),
        config,
    )?;

    let job = orchestrator
        .submit_analysis(AnalysisRequest::new("octocat"))
        .await?;
    println!("Job ID:  {}", job.id);
    println!("Status:  {}", job.status);
    println!();

    let result = orchestrator.wait(&job.id).await?;
    println!("User:         {}", result.username);
    println!("Repositories: {}", result.total_repositories);
    println!("Commits:      {}", result.total_commits);
    if !result.skipped_repositories.is_empty() {
        println!("Skipped:      {}", result.skipped_repositories.join(", "));
    }
    println!();

    println!(
        "{:<18} {:>9} {:>8} {:>8} {:>6} {:>7}",
        "Language", "Intensity", "Lines", "Commits", "Repos", "Recent"
    );
    for lang in &result.languages {
        println!(
            "{:<18} {:>9.2} {:>8} {:>8} {:>6} {:>7}",
            lang.language,
            lang.intensity,
            lang.line_count,
            lang.commit_count,
            lang.repository_count,
            lang.recent_commit_count
        );
    }

    if let Some(top) = result.top_language() {
        println!("\nStrongest signal: {} ({:.1})", top.language, top.intensity);
    }

    println!("\n{}", serde_json::to_string_pretty(&orchestrator.get_status(&job.id).await?)?);

    Ok(())
}
