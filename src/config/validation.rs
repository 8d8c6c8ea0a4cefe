//! Configuration validation module

use crate::config::{AgentConfig, Config, LedgerConfig, LlmConfig, LoggingConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Agent configuration error: {message}")]
    Agent { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Ledger configuration error: {message}")]
    Ledger { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn agent(message: impl Into<String>) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn ledger(message: impl Into<String>) -> Self {
        Self::Ledger {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_seconds == 0 {
            return Err(ValidationError::agent(
                "poll_interval_seconds must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.api_url.is_empty() {
            return Err(ValidationError::llm("api_url must not be empty"));
        }
        if self.model.is_empty() {
            return Err(ValidationError::llm("model must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm(
                "timeout_seconds must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.rpc_url.is_none() {
            return Err(ValidationError::ledger(
                "rpc_url is required when ledger anchoring is enabled",
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.agent.validate()?;
        self.llm.validate()?;
        self.ledger.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
