//! Simulation domain entities

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{JobId, JobStatus, ReportId};

/// A molecular-docking simulation job tracked through the analysis pipeline
///
/// Carries the docking metrics submitted by the researcher plus the agent's
/// processing status. `created_at` is immutable after creation and drives the
/// FIFO pickup order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockingJob {
    /// Unique internal identifier
    pub id: JobId,
    /// Human-readable external identifier (e.g. "SIM-2025-001")
    pub external_id: String,
    /// Target protein name
    pub protein_target: String,
    /// Docked ligand name
    pub ligand_name: String,
    /// Binding affinity in kcal/mol; more negative means stronger binding
    pub binding_affinity: f64,
    /// Root-mean-square deviation in angstroms, non-negative
    pub rmsd: f64,
    /// Ligand efficiency in kcal/mol per heavy atom, if computed
    pub ligand_efficiency: Option<f64>,
    /// Inhibition constant Ki in nM, if computed
    pub inhibition_constant: Option<f64>,
    /// Free-form interaction metrics (hydrogen bonds, contacts, ...)
    pub interaction_data: Option<serde_json::Value>,
    /// Current pipeline status
    pub status: JobStatus,
    /// Human-readable reason recorded when the job moves to `Failed`
    pub failure_reason: Option<String>,
    /// Submission timestamp, immutable
    pub created_at: DateTime<Utc>,
}

impl DockingJob {
    /// Create a new pending job
    pub fn new(
        external_id: String,
        protein_target: String,
        ligand_name: String,
        binding_affinity: f64,
        rmsd: f64,
    ) -> Self {
        Self {
            id: JobId::generate(),
            external_id,
            protein_target,
            ligand_name,
            binding_affinity,
            rmsd,
            ligand_efficiency: None,
            inhibition_constant: None,
            interaction_data: None,
            status: JobStatus::Pending,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the job as picked up by the pipeline
    pub fn mark_processing(&mut self) {
        self.status = JobStatus::Processing;
        self.failure_reason = None;
    }

    /// Mark the job as fully analyzed
    pub fn mark_analyzed(&mut self) {
        self.status = JobStatus::Analyzed;
        self.failure_reason = None;
    }

    /// Mark the job as failed with a human-readable reason
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.failure_reason = Some(reason.into());
    }

    /// Whether the agent may pick this job up
    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Pending
    }
}

/// A categorization tag attached to a job
///
/// Tags are created during the categorization step and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Job this tag belongs to
    pub job_id: JobId,
    /// Tag taxonomy slot (e.g. "binding_strength", "therapeutic_area")
    pub tag_type: String,
    /// Tag value (e.g. "strong", "Oncology")
    pub tag_value: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a new tag for a job
    pub fn new(job_id: JobId, tag_type: impl Into<String>, tag_value: impl Into<String>) -> Self {
        Self {
            job_id,
            tag_type: tag_type.into(),
            tag_value: tag_value.into(),
            created_at: Utc::now(),
        }
    }
}

/// A generated analysis report
///
/// At most one report is produced per pipeline run; a job re-submitted for
/// processing accumulates further reports. `job_id` is a non-owning
/// reference: reports survive job deletion and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique internal identifier
    pub id: ReportId,
    /// Human-readable external identifier (e.g. "REP-2025-183042")
    pub external_id: String,
    /// Job this report was generated for
    pub job_id: JobId,
    /// Report title
    pub title: String,
    /// Short summary of the key findings
    pub executive_summary: String,
    /// Full analysis text
    pub full_content: String,
    /// Structured metrics extracted from the analysis
    pub performance_metrics: serde_json::Value,
    /// Ledger verification token, when anchoring succeeded
    pub verification_token: Option<String>,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Create a new report for a job
    ///
    /// The external identifier follows the `REP-{year}-{6 digits}` convention,
    /// derived from the generation instant.
    pub fn new(
        job: &DockingJob,
        executive_summary: String,
        full_content: String,
        performance_metrics: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReportId::generate(),
            external_id: Self::external_id_at(now),
            job_id: job.id,
            title: format!("{} - {} Analysis", job.protein_target, job.ligand_name),
            executive_summary,
            full_content,
            performance_metrics,
            verification_token: None,
            generated_at: now,
        }
    }

    /// Attach a ledger verification token
    pub fn with_verification_token(mut self, token: Option<String>) -> Self {
        self.verification_token = token;
        self
    }

    fn external_id_at(at: DateTime<Utc>) -> String {
        let millis = at.timestamp_millis().unsigned_abs();
        format!("REP-{}-{:06}", at.year(), millis % 1_000_000)
    }
}
