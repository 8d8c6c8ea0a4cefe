//! In-memory repositories
//!
//! `RwLock<HashMap>`-backed implementations of the store traits. Job listings
//! are sorted `(created_at, id)` ascending to honor the deterministic FIFO
//! contract; report listings come back newest first.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::simulation::{
    DockingJob, IJobRepository, IReportRepository, ITagRepository, JobFilter, JobId, Report,
    ReportId, SimulationError, Tag,
};

/// In-memory job repository
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: Arc<RwLock<HashMap<Uuid, DockingJob>>>,
}

impl InMemoryJobRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IJobRepository for InMemoryJobRepository {
    async fn list(&self, filter: &JobFilter) -> Result<Vec<DockingJob>, SimulationError> {
        let jobs = self.jobs.read().await;
        let mut matched: Vec<DockingJob> = jobs
            .values()
            .filter(|job| {
                if let Some(status) = filter.status {
                    if job.status != status {
                        return false;
                    }
                }
                if let Some(search) = &filter.search {
                    let needle = search.to_lowercase();
                    let hit = job.protein_target.to_lowercase().contains(&needle)
                        || job.ligand_name.to_lowercase().contains(&needle);
                    if !hit {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        matched.sort_by_key(|job| (job.created_at, job.id));
        Ok(matched)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<DockingJob>, SimulationError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id.as_uuid()).cloned())
    }

    async fn create(&self, job: &DockingJob) -> Result<(), SimulationError> {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id.as_uuid(), job.clone());
        Ok(())
    }

    async fn update(&self, job: &DockingJob) -> Result<Option<DockingJob>, SimulationError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id.as_uuid()) {
            Some(stored) => {
                *stored = job.clone();
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &JobId) -> Result<(), SimulationError> {
        let mut jobs = self.jobs.write().await;
        jobs.remove(&id.as_uuid());
        Ok(())
    }
}

/// In-memory report repository
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<HashMap<Uuid, Report>>>,
}

impl InMemoryReportRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IReportRepository for InMemoryReportRepository {
    async fn list(&self) -> Result<Vec<Report>, SimulationError> {
        let reports = self.reports.read().await;
        let mut all: Vec<Report> = reports.values().cloned().collect();
        all.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, SimulationError> {
        let reports = self.reports.read().await;
        Ok(reports.get(&id.as_uuid()).cloned())
    }

    async fn list_for_job(&self, job_id: &JobId) -> Result<Vec<Report>, SimulationError> {
        let reports = self.reports.read().await;
        let mut matched: Vec<Report> = reports
            .values()
            .filter(|r| r.job_id == *job_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(matched)
    }

    async fn create(&self, report: &Report) -> Result<(), SimulationError> {
        let mut reports = self.reports.write().await;
        reports.insert(report.id.as_uuid(), report.clone());
        Ok(())
    }

    async fn delete(&self, id: &ReportId) -> Result<(), SimulationError> {
        let mut reports = self.reports.write().await;
        reports.remove(&id.as_uuid());
        Ok(())
    }
}

/// In-memory tag repository
#[derive(Default)]
pub struct InMemoryTagRepository {
    tags: Arc<RwLock<Vec<Tag>>>,
}

impl InMemoryTagRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ITagRepository for InMemoryTagRepository {
    async fn list_for_job(&self, job_id: &JobId) -> Result<Vec<Tag>, SimulationError> {
        let tags = self.tags.read().await;
        Ok(tags.iter().filter(|t| t.job_id == *job_id).cloned().collect())
    }

    async fn create(&self, tag: &Tag) -> Result<(), SimulationError> {
        let mut tags = self.tags.write().await;
        tags.push(tag.clone());
        Ok(())
    }

    async fn delete_for_job(&self, job_id: &JobId) -> Result<(), SimulationError> {
        let mut tags = self.tags.write().await;
        tags.retain(|t| t.job_id != *job_id);
        Ok(())
    }
}
