//! Google Gemini analysis provider
//!
//! Backs both the categorization and report-generation steps with the Gemini
//! REST API. The client is built eagerly; the API key is checked per call so
//! an unconfigured key surfaces as an external-service error, not a panic.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::LlmConfig;
use crate::domain::simulation::{
    CategorizationProvider, DockingJob, GeneratedAnalysis, ReportProvider, SimulationError,
    TagDraft,
};

use super::prompts;
use super::response_parser::ResponseParser;

const SERVICE_NAME: &str = "gemini";

/// Gemini-backed categorization + report generation
pub struct GeminiAnalysisProvider {
    client: Client,
    config: LlmConfig,
}

impl GeminiAnalysisProvider {
    /// Create a new provider from configuration
    pub fn new(config: LlmConfig) -> Result<Self, SimulationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SimulationError::external(SERVICE_NAME, format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, SimulationError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            SimulationError::external(SERVICE_NAME, "API key not configured")
        })
    }

    /// Send a prompt and return the model's text response
    async fn generate_text(&self, prompt: String) -> Result<String, SimulationError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        debug!(url = %url, "Sending generation request");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SimulationError::external(SERVICE_NAME, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Gemini API error: {}", text);
            return Err(SimulationError::external(
                SERVICE_NAME,
                format!("API error {}: {}", status, text),
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SimulationError::external(SERVICE_NAME, e.to_string()))?;

        body.first_text().ok_or_else(|| {
            SimulationError::external(SERVICE_NAME, "response contained no candidates")
        })
    }
}

#[async_trait]
impl CategorizationProvider for GeminiAnalysisProvider {
    async fn categorize(
        &self,
        protein_target: &str,
        ligand_name: &str,
        binding_affinity: f64,
    ) -> Result<Vec<TagDraft>, SimulationError> {
        let prompt =
            prompts::build_categorization_prompt(protein_target, ligand_name, binding_affinity);
        let text = self.generate_text(prompt).await?;
        let parsed: CategorizationResponse = ResponseParser::parse_json(&text)?;
        Ok(parsed.tags)
    }
}

#[async_trait]
impl ReportProvider for GeminiAnalysisProvider {
    async fn generate(&self, job: &DockingJob) -> Result<GeneratedAnalysis, SimulationError> {
        let prompt = prompts::build_report_prompt(job);
        let text = self.generate_text(prompt).await?;
        let parsed: ReportResponse = ResponseParser::parse_json(&text)?;
        Ok(GeneratedAnalysis {
            executive_summary: parsed.executive_summary,
            full_content: parsed.full_content,
            performance_metrics: parsed.performance_metrics,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// Wire shape of the categorization answer
#[derive(Debug, Deserialize)]
struct CategorizationResponse {
    tags: Vec<TagDraft>,
}

/// Wire shape of the report answer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    executive_summary: String,
    full_content: String,
    #[serde(default)]
    performance_metrics: serde_json::Value,
}
