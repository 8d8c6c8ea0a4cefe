//! Integration tests for the pipeline executor

mod common;

use std::sync::Arc;

use async_trait::async_trait;

use moldock::application::pipeline::PipelineExecutor;
use moldock::domain::simulation::{
    DockingJob, IJobRepository, IReportRepository, ITagRepository, JobFilter, JobId, JobStatus,
    LedgerClient, SimulationError, TagDraft,
};
use moldock::infrastructure::{
    InMemoryJobRepository, InMemoryReportRepository, InMemoryTagRepository,
};

use common::{MockCategorization, MockLedger, MockReportProvider, sample_analysis, sample_job};

struct Harness {
    jobs: Arc<InMemoryJobRepository>,
    reports: Arc<InMemoryReportRepository>,
    tags: Arc<InMemoryTagRepository>,
    executor: PipelineExecutor,
}

fn harness(
    categorization: MockCategorization,
    report_provider: MockReportProvider,
    ledger: Option<MockLedger>,
) -> Harness {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let reports = Arc::new(InMemoryReportRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());

    let executor = PipelineExecutor::new(
        jobs.clone(),
        reports.clone(),
        tags.clone(),
        Arc::new(categorization),
        Arc::new(report_provider),
        ledger.map(|l| Arc::new(l) as Arc<dyn LedgerClient>),
    );

    Harness {
        jobs,
        reports,
        tags,
        executor,
    }
}

/// Happy path: categorization, report, and anchoring all succeed
#[tokio::test]
async fn test_full_run_analyzes_job() {
    let categorization = MockCategorization::new().with_tags(vec![TagDraft {
        tag_type: "binding_strength".to_string(),
        value: "strong".to_string(),
    }]);
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-9.8));
    let h = harness(categorization, report_provider, Some(MockLedger::new()));

    let job = sample_job("SIM-2025-001", "EGFR-TK", "Gefitinib", -9.8);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    assert!(result.success);
    assert!(result.report_id.is_some());
    assert_eq!(result.tags.len(), 1);
    assert_eq!(result.tags[0].tag_type, "binding_strength");
    assert_eq!(result.tags[0].tag_value, "strong");
    assert!(result.failure_reason.is_none());

    let stored = h.jobs.find_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Analyzed);

    let reports = h.reports.list_for_job(&job.id).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].title, "EGFR-TK - Gefitinib Analysis");
    assert_eq!(
        reports[0].performance_metrics["bindingEnergy"],
        serde_json::json!(-9.8)
    );
    assert_eq!(
        reports[0].verification_token.as_deref(),
        Some("ledger-sig-test")
    );

    let tags = h.tags.list_for_job(&job.id).await.unwrap();
    assert_eq!(tags.len(), 1);
}

/// Categorization failure is non-fatal: job still reaches analyzed, zero tags
#[tokio::test]
async fn test_categorization_failure_continues_without_tags() {
    let categorization =
        MockCategorization::new().with_error(SimulationError::external("gemini", "timeout"));
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-7.5));
    let h = harness(categorization, report_provider, None);

    let job = sample_job("SIM-2025-002", "ACE2", "Lisinopril", -7.5);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    assert!(result.success);
    assert!(result.tags.is_empty());

    let stored = h.jobs.find_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Analyzed);
    assert!(h.tags.list_for_job(&job.id).await.unwrap().is_empty());
    assert_eq!(h.reports.list_for_job(&job.id).await.unwrap().len(), 1);
}

/// Report-generation failure is fatal: job fails with a reason, no report,
/// and tags persisted before the failure are kept
#[tokio::test]
async fn test_report_failure_marks_job_failed() {
    let categorization = MockCategorization::new().with_tags(vec![TagDraft {
        tag_type: "therapeutic_area".to_string(),
        value: "Oncology".to_string(),
    }]);
    let report_provider =
        MockReportProvider::new().with_error(SimulationError::external("gemini", "503"));
    let h = harness(categorization, report_provider, Some(MockLedger::new()));

    let job = sample_job("SIM-2025-003", "JAK2", "Ruxolitinib", -8.9);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    assert!(!result.success);
    assert!(result.report_id.is_none());
    let reason = result.failure_reason.expect("failure reason recorded");
    assert!(!reason.is_empty());

    let stored = h.jobs.find_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Failed);
    assert_eq!(stored.failure_reason.as_deref(), Some(reason.as_str()));

    // No report for this run; tags are not rolled back.
    assert!(h.reports.list_for_job(&job.id).await.unwrap().is_empty());
    assert_eq!(h.tags.list_for_job(&job.id).await.unwrap().len(), 1);
}

/// Ledger failure is non-fatal: job analyzed, token absent
#[tokio::test]
async fn test_ledger_failure_leaves_report_unverified() {
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-9.1));
    let ledger = MockLedger::new().with_error(SimulationError::external("ledger", "rpc down"));
    let h = harness(MockCategorization::new(), report_provider, Some(ledger));

    let job = sample_job("SIM-2025-004", "HSP90", "Geldanamycin", -9.1);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    assert!(result.success);
    let stored = h.jobs.find_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Analyzed);

    let reports = h.reports.list_for_job(&job.id).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].verification_token.is_none());
}

/// Absent ledger configuration behaves like a disabled client, not an error
#[tokio::test]
async fn test_disabled_ledger_still_analyzes() {
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-6.2));
    let h = harness(MockCategorization::new(), report_provider, None);

    let job = sample_job("SIM-2025-005", "SARS-CoV-2 Mpro", "Nirmatrelvir", -6.2);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    assert!(result.success);
    let reports = h.reports.list_for_job(&job.id).await.unwrap();
    assert!(reports[0].verification_token.is_none());
}

/// Unknown job id is a caller error and mutates nothing
#[tokio::test]
async fn test_unknown_job_returns_not_found() {
    let h = harness(
        MockCategorization::new(),
        MockReportProvider::new().with_analysis(sample_analysis(-5.0)),
        None,
    );

    let err = h.executor.run(JobId::generate()).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(h.jobs.list(&Default::default()).await.unwrap().is_empty());
    assert!(h.reports.list().await.unwrap().is_empty());
}

/// The anchored payload attests the generated report, not the raw job
#[tokio::test]
async fn test_ledger_payload_references_report() {
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-9.8));
    let ledger = MockLedger::new().with_token("sig-abc123");
    let payloads = ledger.captured_payloads.clone();
    let h = harness(MockCategorization::new(), report_provider, Some(ledger));

    let job = sample_job("SIM-2025-006", "EGFR-TK", "Erlotinib", -9.8);
    h.jobs.create(&job).await.unwrap();

    let result = h.executor.run(job.id).await.unwrap();

    let payloads = payloads.lock().await;
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].job_id, "SIM-2025-006");
    assert_eq!(
        Some(payloads[0].report_id.as_str()),
        result.report_external_id.as_deref()
    );

    let reports = h.reports.list_for_job(&job.id).await.unwrap();
    assert_eq!(reports[0].verification_token.as_deref(), Some("sig-abc123"));
}

/// A job repository that reads fine but rejects every update
struct BrokenUpdateJobRepository {
    inner: Arc<InMemoryJobRepository>,
}

#[async_trait]
impl IJobRepository for BrokenUpdateJobRepository {
    async fn list(&self, filter: &JobFilter) -> Result<Vec<DockingJob>, SimulationError> {
        self.inner.list(filter).await
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<DockingJob>, SimulationError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, job: &DockingJob) -> Result<(), SimulationError> {
        self.inner.create(job).await
    }

    async fn update(&self, _job: &DockingJob) -> Result<Option<DockingJob>, SimulationError> {
        Err(SimulationError::persistence("write failed"))
    }

    async fn delete(&self, id: &JobId) -> Result<(), SimulationError> {
        self.inner.delete(id).await
    }
}

/// A failing status write surfaces as a persistence error from the run
#[tokio::test]
async fn test_update_failure_surfaces_as_persistence_error() {
    let inner = Arc::new(InMemoryJobRepository::new());
    let job = sample_job("SIM-2025-008", "ACE2", "Lisinopril", -7.1);
    inner.create(&job).await.unwrap();

    let reports = Arc::new(InMemoryReportRepository::new());
    let executor = PipelineExecutor::new(
        Arc::new(BrokenUpdateJobRepository {
            inner: inner.clone(),
        }),
        reports.clone(),
        Arc::new(InMemoryTagRepository::new()),
        Arc::new(MockCategorization::new()),
        Arc::new(MockReportProvider::new().with_analysis(sample_analysis(-7.1))),
        None,
    );

    let err = executor.run(job.id).await.unwrap_err();
    assert!(err.is_persistence());

    // The run aborted before generating anything; the stored job is untouched.
    let stored = inner.find_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Pending);
    assert!(reports.list().await.unwrap().is_empty());
}

/// Report generation receives the job's full metric set unchanged
#[tokio::test]
async fn test_report_provider_sees_job_metrics() {
    let report_provider = MockReportProvider::new().with_analysis(sample_analysis(-9.8));
    let captured = report_provider.captured_jobs.clone();
    let h = harness(MockCategorization::new(), report_provider, None);

    let mut job = sample_job("SIM-2025-007", "EGFR-TK", "Gefitinib", -9.8);
    job.ligand_efficiency = Some(0.38);
    job.interaction_data = Some(serde_json::json!({"hydrogenBonds": 4}));
    h.jobs.create(&job).await.unwrap();

    h.executor.run(job.id).await.unwrap();

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].binding_affinity, -9.8);
    assert_eq!(captured[0].ligand_efficiency, Some(0.38));
    assert_eq!(
        captured[0].interaction_data,
        Some(serde_json::json!({"hydrogenBonds": 4}))
    );
}
