//! Common test utilities and mock implementations
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use moldock::domain::simulation::{
    CategorizationProvider, DockingJob, GeneratedAnalysis, LedgerClient, ReportProvider,
    SimulationError, TagDraft, VerificationPayload,
};

/// Mock categorization service
pub struct MockCategorization {
    pub tags: Vec<TagDraft>,
    pub error: Option<SimulationError>,
    /// Captured (target, ligand, affinity) calls for verification
    pub captured_calls: Arc<Mutex<Vec<(String, String, f64)>>>,
}

impl MockCategorization {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            error: None,
            captured_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_tags(mut self, tags: Vec<TagDraft>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_error(mut self, error: SimulationError) -> Self {
        self.error = Some(error);
        self
    }
}

#[async_trait]
impl CategorizationProvider for MockCategorization {
    async fn categorize(
        &self,
        protein_target: &str,
        ligand_name: &str,
        binding_affinity: f64,
    ) -> Result<Vec<TagDraft>, SimulationError> {
        self.captured_calls.lock().await.push((
            protein_target.to_string(),
            ligand_name.to_string(),
            binding_affinity,
        ));

        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.tags.clone())
    }
}

/// Mock report-generation service
pub struct MockReportProvider {
    pub analysis: Option<GeneratedAnalysis>,
    pub error: Option<SimulationError>,
    pub captured_jobs: Arc<Mutex<Vec<DockingJob>>>,
}

impl MockReportProvider {
    pub fn new() -> Self {
        Self {
            analysis: None,
            error: None,
            captured_jobs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_analysis(mut self, analysis: GeneratedAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_error(mut self, error: SimulationError) -> Self {
        self.error = Some(error);
        self
    }
}

#[async_trait]
impl ReportProvider for MockReportProvider {
    async fn generate(&self, job: &DockingJob) -> Result<GeneratedAnalysis, SimulationError> {
        self.captured_jobs.lock().await.push(job.clone());

        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.analysis
            .clone()
            .ok_or_else(|| SimulationError::external("mock", "no analysis configured"))
    }
}

/// Mock ledger anchoring client
pub struct MockLedger {
    pub token: String,
    pub error: Option<SimulationError>,
    pub captured_payloads: Arc<Mutex<Vec<VerificationPayload>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            token: "ledger-sig-test".to_string(),
            error: None,
            captured_payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn with_error(mut self, error: SimulationError) -> Self {
        self.error = Some(error);
        self
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn anchor(&self, payload: &VerificationPayload) -> Result<String, SimulationError> {
        self.captured_payloads.lock().await.push(payload.clone());

        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.token.clone())
    }
}

/// Standard analysis output used across tests
pub fn sample_analysis(binding_energy: f64) -> GeneratedAnalysis {
    GeneratedAnalysis {
        executive_summary: "Strong and stable binding with drug-like properties.".to_string(),
        full_content: "Binding characteristics, interaction profile, efficacy predictions."
            .to_string(),
        performance_metrics: serde_json::json!({
            "bindingEnergy": binding_energy,
            "stabilityScore": 87,
            "toxicityRisk": "low"
        }),
    }
}

/// Standard docking job used across tests
pub fn sample_job(external_id: &str, target: &str, ligand: &str, affinity: f64) -> DockingJob {
    DockingJob::new(
        external_id.to_string(),
        target.to_string(),
        ligand.to_string(),
        affinity,
        1.2,
    )
}
