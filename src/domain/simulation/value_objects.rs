//! Simulation value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Docking job ID value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Create a new JobId from UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random JobId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Report ID value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub Uuid);

impl ReportId {
    /// Create a new ReportId from UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random ReportId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ReportId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing status of a docking job
///
/// Transitions within one pipeline run are monotonic:
/// `Pending -> Processing -> Analyzed | Failed`. A terminal job only becomes
/// `Pending` again through an external re-submission, never through the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Awaiting pickup by the agent
    Pending,
    /// Currently being carried through the pipeline
    Processing,
    /// Terminal: at least one report has been persisted
    Analyzed,
    /// Terminal: report generation failed; a reason is recorded on the job
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state for this run
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Analyzed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Analyzed => "analyzed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
