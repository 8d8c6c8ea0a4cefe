//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub agent: AgentConfig,
    pub llm: LlmConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

/// Agent scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seconds between backlog polls
    pub poll_interval_seconds: u64,
    /// Run one sweep immediately at startup instead of waiting a full interval
    pub process_on_startup: bool,
    /// Seconds to wait for an in-flight run during shutdown
    pub shutdown_timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 10,
            process_on_startup: true,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl AgentConfig {
    /// Polling interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// AI inference service configuration (categorization + report generation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Generation endpoint URL
    pub api_url: String,
    /// API key; overridable via GEMINI_API_KEY
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Per-request timeout (in seconds)
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            api_key: None,
            model: "gemini-2.5-flash-lite".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Ledger anchoring configuration
///
/// Anchoring is optional: with `enabled = false` or no RPC URL the agent
/// persists reports without verification tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Whether anchoring is attempted at all
    pub enabled: bool,
    /// Ledger RPC endpoint; overridable via LEDGER_RPC_URL
    pub rpc_url: Option<String>,
    /// Signing key for the anchoring account; overridable via LEDGER_SIGNER_KEY
    pub signer_key: Option<String>,
    /// Per-request timeout (in seconds)
    pub timeout_seconds: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: None,
            signer_key: None,
            timeout_seconds: 30,
        }
    }
}

impl LedgerConfig {
    /// Whether the client has everything it needs to anchor
    pub fn is_configured(&self) -> bool {
        self.enabled && self.rpc_url.is_some()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment
    ///
    /// Sources, lowest to highest priority: `config/default`, `config/{ENV}`,
    /// `config/local`, then `MOLDOCK__`-prefixed environment variables with
    /// `__` separators (e.g. `MOLDOCK__AGENT__POLL_INTERVAL_SECONDS=5`).
    /// Service secrets follow the common direct-variable convention:
    /// `GEMINI_API_KEY`, `LEDGER_RPC_URL`, `LEDGER_SIGNER_KEY`.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MOLDOCK").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("LEDGER_RPC_URL") {
            config.ledger.rpc_url = Some(url);
        }
        if let Ok(key) = std::env::var("LEDGER_SIGNER_KEY") {
            config.ledger.signer_key = Some(key);
        }

        config.validate()?;

        Ok(config)
    }
}

/// Error loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationError),
}
