//! Ledger anchoring infrastructure
//!
//! Anchors a digest of the report verification payload on a distributed
//! ledger through its RPC endpoint and returns the resulting signature as the
//! verification token. Anchoring is best-effort: the caller treats any error
//! here as a warning, and an unconfigured client is simply never constructed.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

use crate::config::LedgerConfig;
use crate::domain::simulation::{LedgerClient, SimulationError, VerificationPayload};

const SERVICE_NAME: &str = "ledger";

/// HTTP client for the ledger RPC endpoint
pub struct HttpLedgerClient {
    client: Client,
    rpc_url: String,
    signer_key: Option<String>,
}

impl HttpLedgerClient {
    /// Build a client from configuration
    ///
    /// Returns `None` when anchoring is disabled or no RPC URL is set; the
    /// pipeline then runs without a ledger step.
    pub fn from_config(config: &LedgerConfig) -> Result<Option<Self>, SimulationError> {
        let rpc_url = match (&config.rpc_url, config.enabled) {
            (Some(url), true) => url.clone(),
            _ => return Ok(None),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SimulationError::external(SERVICE_NAME, format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Some(Self {
            client,
            rpc_url,
            signer_key: config.signer_key.clone(),
        }))
    }

    /// Canonical hex digest of the verification payload
    fn digest(payload: &VerificationPayload) -> Result<String, SimulationError> {
        let canonical = serde_json::to_vec(payload).map_err(|e| {
            SimulationError::external(SERVICE_NAME, format!("payload serialization failed: {}", e))
        })?;
        let hash = Sha256::digest(&canonical);
        Ok(hash.iter().map(|b| format!("{:02x}", b)).collect())
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn anchor(&self, payload: &VerificationPayload) -> Result<String, SimulationError> {
        let digest = Self::digest(payload)?;

        debug!(report_id = %payload.report_id, digest = %digest, "Anchoring report digest");

        let request = AnchorRequest {
            digest: &digest,
            report_id: &payload.report_id,
            signer: self.signer_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SimulationError::external(SERVICE_NAME, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SimulationError::external(
                SERVICE_NAME,
                format!("RPC error {}: {}", status, text),
            ));
        }

        let body: AnchorResponse = response
            .json()
            .await
            .map_err(|e| SimulationError::external(SERVICE_NAME, e.to_string()))?;

        Ok(body.signature)
    }
}

#[derive(Debug, Serialize)]
struct AnchorRequest<'a> {
    digest: &'a str,
    report_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signer: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AnchorResponse {
    signature: String,
}
