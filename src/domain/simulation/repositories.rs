//! Simulation repository traits

use async_trait::async_trait;

use super::entities::{DockingJob, Report, Tag};
use super::errors::SimulationError;
use super::value_objects::{JobId, JobStatus, ReportId};

/// Filter for job listings
///
/// `search` matches case-insensitively against the protein target and ligand
/// name. Both fields compose with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Restrict to jobs with this status
    pub status: Option<JobStatus>,
    /// Case-insensitive substring over target and ligand names
    pub search: Option<String>,
}

impl JobFilter {
    /// Filter by status only
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            search: None,
        }
    }
}

/// Job repository trait for docking-job persistence
///
/// Listings are ordered by `(created_at, id)` ascending so that pending-job
/// selection is deterministic.
#[async_trait]
pub trait IJobRepository: Send + Sync {
    /// List jobs matching the filter, oldest first
    async fn list(&self, filter: &JobFilter) -> Result<Vec<DockingJob>, SimulationError>;

    /// Find a job by ID
    async fn find_by_id(&self, id: &JobId) -> Result<Option<DockingJob>, SimulationError>;

    /// Create a new job
    async fn create(&self, job: &DockingJob) -> Result<(), SimulationError>;

    /// Update an existing job; returns the stored job or None if absent
    async fn update(&self, job: &DockingJob) -> Result<Option<DockingJob>, SimulationError>;

    /// Delete a job by ID
    async fn delete(&self, id: &JobId) -> Result<(), SimulationError>;
}

/// Report repository trait for generated-report persistence
#[async_trait]
pub trait IReportRepository: Send + Sync {
    /// List all reports, newest first
    async fn list(&self) -> Result<Vec<Report>, SimulationError>;

    /// Find a report by ID
    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, SimulationError>;

    /// List all reports generated for a job
    async fn list_for_job(&self, job_id: &JobId) -> Result<Vec<Report>, SimulationError>;

    /// Create a new report
    async fn create(&self, report: &Report) -> Result<(), SimulationError>;

    /// Delete a report by ID
    async fn delete(&self, id: &ReportId) -> Result<(), SimulationError>;
}

/// Tag repository trait for categorization-tag persistence
///
/// Tags are append-only: created during categorization, deleted with their
/// job, never updated.
#[async_trait]
pub trait ITagRepository: Send + Sync {
    /// List all tags attached to a job
    async fn list_for_job(&self, job_id: &JobId) -> Result<Vec<Tag>, SimulationError>;

    /// Create a new tag
    async fn create(&self, tag: &Tag) -> Result<(), SimulationError>;

    /// Delete all tags attached to a job
    async fn delete_for_job(&self, job_id: &JobId) -> Result<(), SimulationError>;
}
