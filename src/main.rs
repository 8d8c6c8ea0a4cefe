//! Moldock agent - main entry point
//!
//! Wires the store, the analysis providers, and the scheduler, then runs
//! until interrupted.

use std::sync::Arc;

use tokio::signal;

use moldock::application::pipeline::PipelineExecutor;
use moldock::config::Config;
use moldock::domain::simulation::{DockingJob, IJobRepository, LedgerClient, SimulationError};
use moldock::infrastructure::{
    GeminiAnalysisProvider, HttpLedgerClient, InMemoryJobRepository, InMemoryReportRepository,
    InMemoryTagRepository,
};
use moldock::logging::init_tracing;
use moldock::workers::Scheduler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = Config::load().map_err(|e| {
        std::io::Error::other(format!(
            "Failed to load configuration. Check config/ files and MOLDOCK__* env vars: {}",
            e
        ))
    })?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting moldock analysis agent...");

    let jobs = Arc::new(InMemoryJobRepository::new());
    let reports = Arc::new(InMemoryReportRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());

    // The in-memory store starts empty; give the agent a small backlog so a
    // standalone run demonstrates the pipeline end to end.
    seed_demo_jobs(jobs.as_ref()).await?;

    let gemini = Arc::new(GeminiAnalysisProvider::new(config.llm.clone())?);
    let ledger: Option<Arc<dyn LedgerClient>> = HttpLedgerClient::from_config(&config.ledger)?
        .map(|client| Arc::new(client) as Arc<dyn LedgerClient>);

    if ledger.is_none() {
        tracing::info!("Ledger anchoring disabled; reports will carry no verification token");
    }

    let executor = Arc::new(PipelineExecutor::new(
        jobs,
        reports,
        tags,
        gemini.clone(),
        gemini,
        ledger,
    ));

    let scheduler = Scheduler::new(executor, config.agent.process_on_startup);
    scheduler.start(config.agent.poll_interval());

    signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    if let Some(handle) = scheduler.stop() {
        // Let an in-flight run finish, within the configured bound.
        let timeout = std::time::Duration::from_secs(config.agent.shutdown_timeout_seconds);
        if tokio::time::timeout(timeout, handle).await.is_err() {
            tracing::warn!("In-flight pipeline run did not finish before shutdown timeout");
        }
    }

    tracing::info!("Agent stopped");
    Ok(())
}

/// Seed a couple of pending docking jobs into the in-memory store
async fn seed_demo_jobs(jobs: &InMemoryJobRepository) -> Result<(), SimulationError> {
    let mut egfr = DockingJob::new(
        "NV-2024-001".to_string(),
        "EGFR-TK".to_string(),
        "Gefitinib".to_string(),
        -9.8,
        1.2,
    );
    egfr.ligand_efficiency = Some(0.42);
    egfr.inhibition_constant = Some(12.5);
    egfr.interaction_data = Some(serde_json::json!({
        "hBonds": 4,
        "hydrophobic": 7,
        "piStacking": 2,
        "saltBridges": 1
    }));

    let mut mpro = DockingJob::new(
        "NV-2024-002".to_string(),
        "SARS-CoV-2 Mpro".to_string(),
        "PF-07321332".to_string(),
        -8.4,
        1.5,
    );
    mpro.ligand_efficiency = Some(0.38);
    mpro.inhibition_constant = Some(24.8);

    jobs.create(&egfr).await?;
    jobs.create(&mpro).await?;
    tracing::info!(count = 2, "Seeded demo docking jobs");
    Ok(())
}
