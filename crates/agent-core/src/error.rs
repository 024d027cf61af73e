//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error response
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable (connection refused, timeout, DNS)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider reply could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output is valid JSON but lacks an expected key
    #[error("Missing field in model output: {0}")]
    MissingField(String),

    /// Model output has a key whose value has the wrong shape
    #[error("Invalid field `{field}` in model output: {reason}")]
    InvalidField { field: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::RateLimited(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(AgentError::RateLimited("slow down".into()).is_retryable());
        assert!(AgentError::ProviderUnavailable("refused".into()).is_retryable());
        assert!(!AgentError::Auth("bad key".into()).is_retryable());
        assert!(!AgentError::MissingField("priority_level".into()).is_retryable());
    }

    #[test]
    fn test_invalid_field_display() {
        let err = AgentError::InvalidField {
            field: "session_recommendations.duration".into(),
            reason: "expected a number, got a list".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid field `session_recommendations.duration` in model output: expected a number, got a list"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = AgentError::MissingField("priority_level".into());
        assert_eq!(err.to_string(), "Missing field in model output: priority_level");
    }
}
