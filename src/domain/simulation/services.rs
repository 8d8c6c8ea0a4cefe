//! External-service traits consumed by the pipeline
//!
//! The agent depends on three collaborators: a categorization service, a
//! report-generation service, and a best-effort ledger-anchoring client. All
//! three are object-safe and consumed as `Arc<dyn ...>` so the pipeline can
//! be exercised against mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{DockingJob, Report};
use super::errors::SimulationError;

/// A tag produced by categorization, not yet bound to a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    /// Tag taxonomy slot
    #[serde(rename = "type")]
    pub tag_type: String,
    /// Tag value
    pub value: String,
}

/// Structured output of the report-generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAnalysis {
    /// Short summary of key findings
    pub executive_summary: String,
    /// Full analysis text
    pub full_content: String,
    /// Structured metrics (bindingEnergy, stabilityScore, ...)
    pub performance_metrics: serde_json::Value,
}

/// Verification payload anchored on the ledger for a report
#[derive(Debug, Clone, Serialize)]
pub struct VerificationPayload {
    /// Report external identifier
    pub report_id: String,
    /// Job external identifier
    pub job_id: String,
    /// Executive summary being attested
    pub executive_summary: String,
    /// Report generation instant
    pub generated_at: DateTime<Utc>,
}

impl VerificationPayload {
    /// Build the payload for a generated report
    pub fn for_report(report: &Report, job: &DockingJob) -> Self {
        Self {
            report_id: report.external_id.clone(),
            job_id: job.external_id.clone(),
            executive_summary: report.executive_summary.clone(),
            generated_at: report.generated_at,
        }
    }
}

/// Categorization service: maps docking attributes to descriptive tags
///
/// Failure of this service is non-fatal for a pipeline run.
#[async_trait]
pub trait CategorizationProvider: Send + Sync {
    /// Derive categorization tags from target, ligand, and affinity
    async fn categorize(
        &self,
        protein_target: &str,
        ligand_name: &str,
        binding_affinity: f64,
    ) -> Result<Vec<TagDraft>, SimulationError>;
}

/// Report-generation service: produces the structured analysis for a job
///
/// This is the single mandatory-success step of the pipeline.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    /// Generate the analysis report from the job's full metric set
    async fn generate(&self, job: &DockingJob) -> Result<GeneratedAnalysis, SimulationError>;
}

/// Ledger-anchoring client: obtains a tamper-evident verification token
///
/// Best-effort: failure or absence of configuration leaves the report valid
/// without a token.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Anchor the payload and return an opaque verification token
    async fn anchor(&self, payload: &VerificationPayload) -> Result<String, SimulationError>;
}
