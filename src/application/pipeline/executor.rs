//! Pipeline executor
//!
//! Carries exactly one docking job from `pending` to a terminal state:
//! categorization, report generation, optional ledger anchoring, persistence.
//! Categorization and anchoring are enrichments and never abort a run; report
//! generation is the deliverable and its failure moves the job to `failed`.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::domain::simulation::{
    CategorizationProvider, DockingJob, IJobRepository, IReportRepository, ITagRepository,
    JobFilter, JobId, JobStatus, LedgerClient, Report, ReportId, ReportProvider, SimulationError,
    Tag, VerificationPayload,
};

/// Outcome of one pipeline run
///
/// A run that reached report generation and failed there still yields a
/// `RunResult` (with `success = false` and the recorded reason) so the
/// scheduler can log it without treating it as a process-level error. Only
/// caller errors (`NotFound`) and store failures (`Persistence`) surface as
/// `Err` from [`PipelineExecutor::run`].
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Whether the job reached `analyzed`
    pub success: bool,
    /// Internal id of the generated report, when one was persisted
    pub report_id: Option<ReportId>,
    /// External id of the generated report, when one was persisted
    pub report_external_id: Option<String>,
    /// Tags persisted during categorization
    pub tags: Vec<Tag>,
    /// Failure reason recorded on the job, when the run failed
    pub failure_reason: Option<String>,
}

/// Executes the analysis pipeline for one job at a time
///
/// A single global guard serializes every execution path: the scheduler's
/// tick uses [`try_process_next`](Self::try_process_next) and skips when the
/// guard is held, while manual triggers through [`run`](Self::run) queue
/// behind it. At most one run is ever active per executor.
pub struct PipelineExecutor {
    jobs: Arc<dyn IJobRepository>,
    reports: Arc<dyn IReportRepository>,
    tags: Arc<dyn ITagRepository>,
    categorization: Arc<dyn CategorizationProvider>,
    report_provider: Arc<dyn ReportProvider>,
    ledger: Option<Arc<dyn LedgerClient>>,
    busy: Mutex<()>,
}

impl PipelineExecutor {
    /// Create a new executor
    ///
    /// `ledger` is `None` when anchoring is not configured; reports are then
    /// persisted without verification tokens.
    pub fn new(
        jobs: Arc<dyn IJobRepository>,
        reports: Arc<dyn IReportRepository>,
        tags: Arc<dyn ITagRepository>,
        categorization: Arc<dyn CategorizationProvider>,
        report_provider: Arc<dyn ReportProvider>,
        ledger: Option<Arc<dyn LedgerClient>>,
    ) -> Self {
        Self {
            jobs,
            reports,
            tags,
            categorization,
            report_provider,
            ledger,
            busy: Mutex::new(()),
        }
    }

    /// Run the pipeline for a specific job
    ///
    /// Serializes behind the execution guard, so a manual trigger racing the
    /// scheduler waits instead of double-processing.
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn run(&self, job_id: JobId) -> Result<RunResult, SimulationError> {
        let _guard = self.busy.lock().await;
        self.execute(job_id).await
    }

    /// Pick the oldest pending job and run it, unless a run is in flight
    ///
    /// Returns `Ok(None)` when the guard is held or no backlog exists; this
    /// is the scheduler's per-tick entry point.
    pub async fn try_process_next(&self) -> Result<Option<RunResult>, SimulationError> {
        let _guard = match self.busy.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Previous pipeline run still in flight, skipping");
                return Ok(None);
            }
        };

        let pending = self
            .jobs
            .list(&JobFilter::with_status(JobStatus::Pending))
            .await?;

        // Repositories list oldest-first; take the minimum anyway so pickup
        // order never depends on a particular store implementation.
        let next = pending
            .into_iter()
            .min_by_key(|job| (job.created_at, job.id));

        let Some(job) = next else {
            return Ok(None);
        };

        info!(job_id = %job.id, target = %job.protein_target, "Picked up pending job");
        let result = self.execute(job.id).await?;
        Ok(Some(result))
    }

    /// The four-step run; callers hold the execution guard.
    async fn execute(&self, job_id: JobId) -> Result<RunResult, SimulationError> {
        let Some(mut job) = self.jobs.find_by_id(&job_id).await? else {
            return Err(SimulationError::NotFound {
                id: job_id.to_string(),
            });
        };

        // Persist the in-flight state before any external call so concurrent
        // observers see it.
        job.mark_processing();
        self.persist_job(&job).await?;

        let tags = self.categorize_step(&job).await?;

        let analysis = match self.report_provider.generate(&job).await {
            Ok(analysis) => analysis,
            Err(err) => {
                // The report is the deliverable; without it the run has
                // achieved nothing. Tags persisted above are kept.
                let reason = err.to_string();
                warn!(job_id = %job.id, error = %err, "Report generation failed, marking job failed");
                job.mark_failed(reason.clone());
                self.persist_job(&job).await?;
                return Ok(RunResult {
                    success: false,
                    report_id: None,
                    report_external_id: None,
                    tags,
                    failure_reason: Some(reason),
                });
            }
        };

        let report = Report::new(
            &job,
            analysis.executive_summary,
            analysis.full_content,
            analysis.performance_metrics,
        );

        let token = self.anchor_step(&report, &job).await;
        let report = report.with_verification_token(token);

        // Report persistence happens before the terminal status write, so an
        // observer never sees `analyzed` without a stored report.
        self.reports.create(&report).await?;
        job.mark_analyzed();
        self.persist_job(&job).await?;

        info!(
            job_id = %job.id,
            report_id = %report.external_id,
            tag_count = tags.len(),
            verified = report.verification_token.is_some(),
            "Job analyzed"
        );

        Ok(RunResult {
            success: true,
            report_id: Some(report.id),
            report_external_id: Some(report.external_id),
            tags,
            failure_reason: None,
        })
    }

    /// Categorization step: non-fatal, yields zero tags on failure.
    async fn categorize_step(&self, job: &DockingJob) -> Result<Vec<Tag>, SimulationError> {
        let drafts = match self
            .categorization
            .categorize(&job.protein_target, &job.ligand_name, job.binding_affinity)
            .await
        {
            Ok(drafts) => drafts,
            Err(err) => {
                warn!(job_id = %job.id, error = %err, "Categorization failed, continuing without tags");
                return Ok(Vec::new());
            }
        };

        let mut tags = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let tag = Tag::new(job.id, draft.tag_type, draft.value);
            self.tags.create(&tag).await?;
            tags.push(tag);
        }
        Ok(tags)
    }

    /// Ledger anchoring step: best-effort, absent token on failure or when
    /// the client is not configured.
    async fn anchor_step(&self, report: &Report, job: &DockingJob) -> Option<String> {
        let ledger = match &self.ledger {
            Some(ledger) => ledger,
            None => {
                debug!(job_id = %job.id, "Ledger anchoring disabled, skipping");
                return None;
            }
        };

        let payload = VerificationPayload::for_report(report, job);
        match ledger.anchor(&payload).await {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(job_id = %job.id, error = %err, "Ledger anchoring failed, report stays unverified");
                None
            }
        }
    }

    /// Persist a job update, mapping a vanished row to `Persistence`: losing
    /// the job mid-run invalidates the run's guarantees.
    async fn persist_job(&self, job: &DockingJob) -> Result<(), SimulationError> {
        match self.jobs.update(job).await? {
            Some(_) => Ok(()),
            None => Err(SimulationError::persistence(format!(
                "job {} disappeared during pipeline run",
                job.id
            ))),
        }
    }
}
