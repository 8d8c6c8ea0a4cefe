//! Simulation domain errors

use thiserror::Error;

/// Errors raised by the analysis agent and its collaborators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Job id unknown (caller error, never mutates state)
    #[error("Job not found: {id}")]
    NotFound { id: String },

    /// Malformed job fields (caller error)
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// An external service call (categorization, report generation, ledger)
    /// failed or timed out
    #[error("External service '{service}' failed: {message}")]
    ExternalService { service: String, message: String },

    /// A store operation failed; invalidates the whole run's guarantees
    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

impl SimulationError {
    /// Build an external-service error
    pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Build a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, SimulationError::NotFound { .. })
    }

    /// Check if this error came from an external service
    pub fn is_external(&self) -> bool {
        matches!(self, SimulationError::ExternalService { .. })
    }

    /// Check if this error came from the store
    pub fn is_persistence(&self) -> bool {
        matches!(self, SimulationError::Persistence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulationError::NotFound {
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Job not found: 42");

        let err = SimulationError::external("gemini", "timeout");
        assert_eq!(err.to_string(), "External service 'gemini' failed: timeout");
    }

    #[test]
    fn test_predicates() {
        assert!(
            SimulationError::NotFound {
                id: "x".to_string()
            }
            .is_not_found()
        );
        assert!(SimulationError::external("ledger", "down").is_external());
        assert!(SimulationError::persistence("write failed").is_persistence());
        assert!(!SimulationError::persistence("write failed").is_external());
    }
}
